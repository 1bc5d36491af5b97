//! The analysis flow as a pure state machine: the driver feeds events in and
//! executes the effects that come back out.
//!
//! Keeping this pure pins down the awkward interleavings (events arriving in
//! the wrong state are ignored, never re-scored) and makes the flow testable
//! without a UI.

use crate::policy::{self, Verdict};

/// Where the current analysis stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    /// Nothing in flight. The driver may hold a staged upload.
    #[default]
    Idle,
    /// An inference request is outstanding.
    Analyzing,
    /// The policy produced a verdict, retained for re-render until the next
    /// upload replaces it.
    Resolved { verdict: Verdict, score: f32 },
}

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user staged a new upload.
    ImageSelected,
    /// The user asked for the staged upload to be analyzed.
    AnalyzeRequested,
    /// The classifier returned a raw score.
    ScoreReady(f32),
    /// The classifier failed before producing a score.
    InferenceFailed(String),
}

/// What the driver must do in response.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the model on the staged upload and feed the score back in.
    RunInference,
    /// Count one completed analysis against the session.
    RecordPrediction { score: f32 },
    /// Surface a failure to the user; the request is over.
    ShowError(String),
}

/// Advances the flow. Events that make no sense in the current state leave
/// it untouched and produce no effects.
///
/// The classification policy runs in exactly one place: the
/// `Analyzing` + `ScoreReady` arm. One analysis, one verdict.
pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Idle | State::Resolved { .. }, Event::ImageSelected) => (State::Idle, vec![]),
        (State::Idle | State::Resolved { .. }, Event::AnalyzeRequested) => {
            (State::Analyzing, vec![Effect::RunInference])
        }
        (State::Analyzing, Event::ScoreReady(score)) => match policy::classify(score) {
            Ok(verdict) => (
                State::Resolved { verdict, score },
                vec![Effect::RecordPrediction { score }],
            ),
            Err(err) => (State::Idle, vec![Effect::ShowError(err.to_string())]),
        },
        (State::Analyzing, Event::InferenceFailed(reason)) => {
            (State::Idle, vec![Effect::ShowError(reason)])
        }
        (state, _) => (state, vec![]),
    }
}
