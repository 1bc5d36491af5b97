//! Session bookkeeping: the per-session counters and the context object the
//! renderer reads them from.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Tally band: scores strictly above this count as dogs.
pub const TALLY_DOG_MIN: f32 = 0.9;
/// Tally band: scores strictly below this count as cats.
pub const TALLY_CAT_MAX: f32 = 0.1;
/// Tally band: inclusive range counted as "other object".
pub const TALLY_OTHER_MIN: f32 = 0.15;
pub const TALLY_OTHER_MAX: f32 = 0.85;

/// Prediction counters, zeroed when the session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionCounters {
    pub predictions_made: u32,
    pub cats_detected: u32,
    pub dogs_detected: u32,
    pub other_objects: u32,
}

impl SessionCounters {
    /// Records one completed analysis.
    ///
    /// The tally bands are wider than the display bands, so a score can be
    /// shown as uncertain yet still count as a dog or cat here. Scores in
    /// `[0.1, 0.15)` or `(0.85, 0.9]` bump the total but no per-label
    /// counter.
    pub fn record(&mut self, score: f32) {
        self.predictions_made += 1;
        if score > TALLY_DOG_MIN {
            self.dogs_detected += 1;
        } else if score < TALLY_CAT_MAX {
            self.cats_detected += 1;
        } else if (TALLY_OTHER_MIN..=TALLY_OTHER_MAX).contains(&score) {
            self.other_objects += 1;
        }
    }
}

/// Explicit session state owned by the driver and handed to the renderer.
///
/// Created when the session starts and discarded with it; nothing here is
/// persisted.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub counters: SessionCounters,
    pub started_at: DateTime<Local>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            counters: SessionCounters::default(),
            started_at: Local::now(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_analysis_increments_the_total() {
        let mut counters = SessionCounters::default();
        for score in [0.0, 0.12, 0.5, 0.87, 1.0] {
            counters.record(score);
        }
        assert_eq!(counters.predictions_made, 5);
    }

    #[test]
    fn tally_band_routing() {
        let mut counters = SessionCounters::default();
        counters.record(0.95);
        counters.record(0.99);
        counters.record(0.05);
        counters.record(0.5);
        assert_eq!(counters.dogs_detected, 2);
        assert_eq!(counters.cats_detected, 1);
        assert_eq!(counters.other_objects, 1);
    }

    #[test]
    fn gap_scores_count_only_toward_the_total() {
        let mut counters = SessionCounters::default();
        counters.record(0.12);
        counters.record(0.87);
        assert_eq!(counters.predictions_made, 2);
        assert_eq!(counters.dogs_detected, 0);
        assert_eq!(counters.cats_detected, 0);
        assert_eq!(counters.other_objects, 0);
    }

    #[test]
    fn tally_edges() {
        let mut counters = SessionCounters::default();
        // Dog and cat edges are strict; 0.9 and 0.1 fall through.
        counters.record(0.9);
        counters.record(0.1);
        assert_eq!(counters.dogs_detected, 0);
        assert_eq!(counters.cats_detected, 0);
        // The "other" band is inclusive on both ends.
        counters.record(0.15);
        counters.record(0.85);
        assert_eq!(counters.other_objects, 2);
    }

    #[test]
    fn fresh_context_starts_zeroed() {
        let context = SessionContext::new();
        assert_eq!(context.counters, SessionCounters::default());
    }
}
