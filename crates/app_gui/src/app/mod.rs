//! GUI driver: owns the classifier, the session and the machine state,
//! executes the effects the machine asks for, and lays out the two-column
//! screen.

mod result;
mod upload;

use std::path::Path;
use std::time::{Duration, Instant};

use eframe::{App, Frame, egui};
use pet_core::machine::{self, Effect, Event, State};
use pet_core::preprocess::PreparedImage;
use pet_core::{AppConfig, Backend, Classifier, FakeClassifier, PetError, SessionContext};

const APP_VERSION: &str = env!("PET_CLASSIFIER_VERSION");
const PREVIEW_TEXTURE_MAX_PX: u32 = 512;

/// A deferred inference request, executed once the deadline passes so the
/// thinking indicator gets at least one frame on screen.
struct PendingAnalysis {
    started: Instant,
    deadline: Instant,
}

pub struct UiApp {
    config: AppConfig,
    classifier: Option<Box<dyn Classifier>>,
    /// Startup failure shown instead of the analyze flow.
    load_error: Option<String>,
    model_version: String,
    state: State,
    session: SessionContext,
    image: Option<PreparedImage>,
    image_name: Option<String>,
    preview: Option<egui::TextureHandle>,
    pending: Option<PendingAnalysis>,
    status: String,
}

impl UiApp {
    pub fn new(config: AppConfig) -> Self {
        let (classifier, load_error, model_version) = build_classifier(&config);
        Self {
            config,
            classifier,
            load_error,
            model_version,
            state: State::Idle,
            session: SessionContext::new(),
            image: None,
            image_name: None,
            preview: None,
            pending: None,
            status: String::new(),
        }
    }

    fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = machine::transition(state, event);
        tracing::debug!(state = ?next, effects = effects.len(), "transition");
        self.state = next;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RunInference => {
                let now = Instant::now();
                self.pending = Some(PendingAnalysis {
                    started: now,
                    deadline: now + Duration::from_millis(self.config.thinking_delay_ms),
                });
                self.status = "🧠 AI is thinking...".to_string();
            }
            Effect::RecordPrediction { score } => {
                self.session.counters.record(score);
                tracing::debug!(score, "prediction recorded");
            }
            Effect::ShowError(message) => {
                tracing::warn!("analysis failed: {message}");
                self.status = format!("⚠️ {message}");
            }
        }
    }

    /// Runs the deferred inference once its deadline passes.
    fn poll_pending(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending else { return };
        let now = Instant::now();
        if now < pending.deadline {
            ctx.request_repaint_after(pending.deadline - now);
            return;
        }
        let started = pending.started;
        self.pending = None;
        // Blocking on the UI thread; fine for a one-image demo.
        let outcome = match (&self.classifier, &self.image) {
            (Some(classifier), Some(image)) => classifier.predict(&image.tensor),
            _ => Err(PetError::Inference("nothing staged to analyze".into())),
        };
        match outcome {
            Ok(score) => {
                self.dispatch(Event::ScoreReady(score));
                if matches!(self.state, State::Resolved { .. }) {
                    self.status = format!("Analyzed in {:.1?}", started.elapsed());
                }
            }
            Err(e) => self.dispatch(Event::InferenceFailed(e.to_string())),
        }
    }

    fn stage_upload_from_path(&mut self, path: &Path) {
        match pet_core::prepare_file(path) {
            Ok(prepared) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.stage(name, prepared);
            }
            Err(e) => self.reject_upload(e),
        }
    }

    fn stage_upload_from_bytes(&mut self, name: &str, bytes: &[u8]) {
        match pet_core::prepare_bytes(name, bytes) {
            Ok(prepared) => self.stage(name.to_string(), prepared),
            Err(e) => self.reject_upload(e),
        }
    }

    fn stage(&mut self, name: String, prepared: PreparedImage) {
        tracing::info!(%name, "upload staged");
        self.image_name = Some(name);
        self.image = Some(prepared);
        self.preview = None;
        self.status.clear();
        self.dispatch(Event::ImageSelected);
    }

    fn reject_upload(&mut self, err: PetError) {
        tracing::warn!("upload rejected: {err}");
        self.status = format!("⚠️ {err}");
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() || matches!(self.state, State::Analyzing) {
            return;
        }
        // One image per analysis; extra dropped files are ignored.
        let file = &dropped[0];
        if let Some(path) = &file.path {
            self.stage_upload_from_path(path);
        } else if let Some(bytes) = &file.bytes {
            self.stage_upload_from_bytes(&file.name, bytes);
        }
    }

    /// Lazily uploads the preview texture, downscaled to keep VRAM sane.
    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        if let Some(tex) = &self.preview {
            return Some(tex.id());
        }
        let image = self.image.as_ref()?;
        let (w, h) = image.preview.dimensions();
        let scale = (PREVIEW_TEXTURE_MAX_PX as f32 / w.max(h) as f32).min(1.0);
        let (tw, th) = (
            ((w as f32 * scale) as u32).max(1),
            ((h as f32 * scale) as u32).max(1),
        );
        let thumb = image::imageops::thumbnail(&image.preview, tw, th);
        let size = [tw as usize, th as usize];
        let pixels = image::DynamicImage::ImageRgb8(thumb).to_rgba8().into_raw();
        let color = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
        let name = format!("preview:{}", self.image_name.as_deref().unwrap_or("upload"));
        let tex = ctx.load_texture(name, color, egui::TextureOptions::LINEAR);
        let id = tex.id();
        self.preview = Some(tex);
        Some(id)
    }
}

fn build_classifier(config: &AppConfig) -> (Option<Box<dyn Classifier>>, Option<String>, String) {
    match config.backend {
        Backend::Fake => (
            Some(Box::new(FakeClassifier::new())),
            None,
            "demo".to_string(),
        ),
        #[cfg(feature = "ort")]
        Backend::Onnx => match pet_core::OnnxClassifier::load(&config.model_dir) {
            Ok(model) => {
                let version = model.version().to_string();
                (Some(Box::new(model)), None, version)
            }
            Err(e) => {
                tracing::error!("model load failed: {e}");
                (None, Some(e.to_string()), "unavailable".to_string())
            }
        },
        #[cfg(not(feature = "ort"))]
        Backend::Onnx => (
            None,
            Some("this build has no ONNX support; rebuild with --features ort".to_string()),
            "unavailable".to_string(),
        ),
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_pending(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("🐱 Pet Classifier 🐶").size(26.0).strong());
                ui.label(egui::RichText::new("AI-Powered Cat vs Dog Detection").weak());
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Made with ❤️ using egui and ONNX Runtime")
                        .small()
                        .weak(),
                );
                ui.label(
                    egui::RichText::new(
                        "Tip: For best results, use high-quality photos with good lighting!",
                    )
                    .small()
                    .weak(),
                );
                ui.label(
                    egui::RichText::new(format!("v{APP_VERSION} | model {}", self.model_version))
                        .small()
                        .weak(),
                );
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.render_upload_panel(&mut columns[0], ctx);
                self.render_result_panel(&mut columns[1]);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_backend_always_wires() {
        let (classifier, error, version) = build_classifier(&AppConfig::default());
        assert!(classifier.is_some());
        assert!(error.is_none());
        assert_eq!(version, "demo");
    }

    #[cfg(not(feature = "ort"))]
    #[test]
    fn onnx_backend_without_the_feature_reports_why() {
        let config = AppConfig {
            backend: Backend::Onnx,
            ..AppConfig::default()
        };
        let (classifier, error, _) = build_classifier(&config);
        assert!(classifier.is_none());
        assert!(error.unwrap().contains("--features ort"));
    }
}
