use eframe::egui;

use crate::config::Config;
use crate::data::cache::CachedSource;
use crate::data::google::GoogleTrends;
use crate::data::source::InterestSource;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

/// Google Trends client behind the 1-hour cache.
pub fn live_source(config: &Config) -> Box<dyn InterestSource> {
    Box::new(CachedSource::new(
        GoogleTrends::new(config.google_options()),
        config.cache_ttl(),
    ))
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrendPulseApp {
    pub state: AppState,
}

impl TrendPulseApp {
    pub fn new(config: Config) -> Self {
        let source = live_source(&config);
        let mut state = AppState::new(config, source);
        state.refresh_now();
        Self { state }
    }
}

impl eframe::App for TrendPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One state per frame keeps the UI responsive and paints progress.
        if self.state.is_fetching() {
            self.state.step_fetch();
            ctx.request_repaint_after(self.state.config.request_delay());
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
