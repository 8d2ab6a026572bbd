//! Fretboard Multitool - interactive fretboard diagrams
//!
//! Entry point for the application.

use eframe::egui;
use tracing_subscriber::EnvFilter;

use fretboard_multitool::app::FretboardApp;
use fretboard_multitool::config;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = config::config_path(std::env::args());
    let config = config::load_or_default(config_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title("Fretboard Multitool"),
        ..Default::default()
    };

    eframe::run_native(
        "Fretboard Multitool",
        options,
        Box::new(move |_cc| Ok(Box::new(FretboardApp::new(config)))),
    )
}
