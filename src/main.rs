//! COVID Story - Five-scene narrative of daily COVID-19 cases in New York

use covid_story::config::StoryConfig;
use covid_story::gui::StoryApp;
use eframe::egui;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("covid_story=info")),
        )
        .init();

    let config = match StoryConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %format!("{:#}", e), "invalid configuration, using defaults");
            StoryConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("COVID-19 in New York"),
        ..Default::default()
    };

    eframe::run_native(
        "COVID Story",
        options,
        Box::new(|cc| Ok(Box::new(StoryApp::new(cc, config)))),
    )
}
