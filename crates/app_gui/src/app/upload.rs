//! Left column: pick or drop a photo, preview it, kick off the analysis.

use eframe::egui::{self, RichText};
use pet_core::machine::{Event, State};
use rfd::FileDialog;

use super::UiApp;

const PREVIEW_MAX_EDGE: f32 = 300.0;

impl UiApp {
    pub(super) fn render_upload_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("📸 Upload Your Pet Photo (Only Dog or Cat)");
        ui.label(RichText::new("JPG, JPEG or PNG").weak());
        ui.add_space(8.0);

        if let Some(error) = self.load_error.clone() {
            egui::Frame::group(ui.style())
                .fill(egui::Color32::from_rgb(60, 30, 30))
                .show(ui, |ui| {
                    ui.colored_label(egui::Color32::from_rgb(255, 160, 160), format!("❌ {error}"));
                    ui.label(
                        RichText::new("Analysis is disabled until a model is available.")
                            .small()
                            .weak(),
                    );
                });
            ui.add_space(8.0);
        }

        let analyzing = matches!(self.state, State::Analyzing);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!analyzing, egui::Button::new("📁 Choose a photo..."))
                .clicked()
                && let Some(path) = FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .set_directory(".")
                    .pick_file()
            {
                self.stage_upload_from_path(&path);
            }
            ui.label(RichText::new("or drop a file anywhere").weak());
        });

        if let Some(id) = self.preview_texture(ctx) {
            ui.add_space(8.0);
            let size = self
                .preview
                .as_ref()
                .map(|t| t.size_vec2())
                .unwrap_or(egui::Vec2::splat(PREVIEW_MAX_EDGE));
            let scale = (PREVIEW_MAX_EDGE / size.x)
                .min(PREVIEW_MAX_EDGE / size.y)
                .min(1.0);
            let (resp, painter) = ui.allocate_painter(size * scale, egui::Sense::hover());
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(id, resp.rect, uv, egui::Color32::WHITE);
            if let Some(name) = &self.image_name {
                ui.label(RichText::new(format!("📷 {name}")).small().weak());
            }
        }

        ui.add_space(8.0);
        let can_analyze = !analyzing && self.image.is_some() && self.classifier.is_some();
        if ui
            .add_enabled(
                can_analyze,
                egui::Button::new(RichText::new("🔍 Analyze Pet").size(16.0)),
            )
            .clicked()
        {
            self.dispatch(Event::AnalyzeRequested);
        }

        if !self.status.is_empty() {
            ui.add_space(4.0);
            ui.label(&self.status);
        }

        ui.add_space(12.0);
        render_fun_fact(ui);
    }
}

fn render_fun_fact(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.label(RichText::new("🧠 Did You Know?").strong());
            ui.label(
                "This AI model was trained on thousands of cat and dog images to learn \
                 the subtle differences between our furry friends!",
            );
        });
}
