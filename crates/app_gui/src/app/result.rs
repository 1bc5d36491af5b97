//! Right column: the verdict card and the session stats.

use chrono::{DateTime, Local};
use eframe::egui::{self, Color32, RichText};
use pet_core::machine::State;
use pet_core::{Label, Verdict};

use super::UiApp;

impl UiApp {
    pub(super) fn render_result_panel(&self, ui: &mut egui::Ui) {
        ui.heading("📊 Classification Results");
        ui.add_space(8.0);

        match &self.state {
            State::Idle => render_placeholder_card(ui),
            State::Analyzing => render_thinking_card(ui),
            State::Resolved { verdict, .. } => render_verdict_card(ui, verdict),
        }

        ui.add_space(12.0);
        self.render_stats(ui);
    }

    fn render_stats(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Session Stats").strong());
        ui.add_space(4.0);
        let counters = self.session.counters;
        ui.columns(4, |cols| {
            stat_box(&mut cols[0], counters.predictions_made, "Predictions");
            stat_box(&mut cols[1], counters.cats_detected, "Cats");
            stat_box(&mut cols[2], counters.dogs_detected, "Dogs");
            stat_box(&mut cols[3], counters.other_objects, "Other");
        });
        ui.add_space(4.0);
        ui.label(
            RichText::new(session_started_line(self.session.started_at))
                .small()
                .weak(),
        );
    }
}

fn render_placeholder_card(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("🎯 Ready to Analyze!").size(20.0).strong());
                ui.label("Upload an image to get started");
                ui.add_space(6.0);
                ui.label(RichText::new("🐾").size(42.0));
            });
        });
}

fn render_thinking_card(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(28.0));
                ui.label(RichText::new("🧠 AI is thinking...").strong());
                ui.label(RichText::new("Analyzing your pet photo").weak());
            });
        });
}

fn render_verdict_card(ui: &mut egui::Ui, verdict: &Verdict) {
    let (fill, text) = card_palette(verdict.label);
    egui::Frame::group(ui.style())
        .fill(fill)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(verdict.label.headline())
                        .size(24.0)
                        .strong()
                        .color(text),
                );
                ui.label(
                    RichText::new(confidence_line(verdict))
                        .size(18.0)
                        .color(text),
                );
                ui.add_space(6.0);
                ui.label(RichText::new(verdict.message).color(text));
            });
        });
}

fn card_palette(label: Label) -> (Color32, Color32) {
    match label {
        Label::Dog => (Color32::from_rgb(79, 172, 254), Color32::WHITE),
        Label::Cat => (Color32::from_rgb(250, 112, 154), Color32::WHITE),
        Label::NotPet | Label::Uncertain => (
            Color32::from_rgb(252, 182, 159),
            Color32::from_rgb(139, 69, 19),
        ),
    }
}

fn confidence_line(verdict: &Verdict) -> String {
    match verdict.label {
        Label::Dog | Label::Cat => format!("{} Confident", verdict.confidence_display()),
        Label::NotPet | Label::Uncertain => {
            format!("Confidence: {}", verdict.confidence_display())
        }
    }
}

fn session_started_line(started_at: DateTime<Local>) -> String {
    format!("Session started {}", started_at.format("%H:%M"))
}

fn stat_box(ui: &mut egui::Ui, value: u32, caption: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value.to_string()).size(20.0).strong());
                ui.label(RichText::new(caption).small().weak());
            });
        });
}
