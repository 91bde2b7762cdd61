mod app;
mod color;
mod config;
mod data;
mod regions;
mod state;
mod ui;

use app::TrendPulseApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}; falling back to defaults");
            Config::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("Trend Pulse – {} in India", config.keyword);
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(TrendPulseApp::new(config)))),
    )
}
