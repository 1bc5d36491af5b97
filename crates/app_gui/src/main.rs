use std::path::Path;

use eframe::NativeOptions;
use pet_core::AppConfig;

mod app;

use app::UiApp;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::load(Path::new(AppConfig::FILE_NAME)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(?config, "starting up");

    let options = NativeOptions::default();
    if let Err(e) = eframe::run_native(
        "Pet Classifier",
        options,
        Box::new(move |_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(config)))
        }),
    ) {
        eprintln!("Application stopped with error: {e}");
    }
}
