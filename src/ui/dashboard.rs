use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::generate_palette;
use crate::data::filter::selected_regions;
use crate::state::AppState;
use crate::ui::{plot, summary};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the title, progress, metrics and per-region chart grids.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("🦟 {} Google Trends – India", state.config.keyword));

    let regions = selected_regions(&state.regions);
    let names: Vec<&str> = regions.iter().map(|r| r.name).collect();
    ui.label(format!(
        "Showing last {} days | Regions: {}",
        state.window_days,
        names.join(", ")
    ));

    if regions.is_empty() {
        ui.colored_label(crate::color::NO_DATA, "Please select at least one region.");
        return;
    }

    if let Some(progress) = &state.fetch {
        let text = progress
            .next_state()
            .map_or_else(|| "Fetching trends data…".to_string(), |s| format!("Fetching: {s}…"));
        ui.add(egui::ProgressBar::new(progress.fraction()).text(text));
    }

    summary::metrics_row(ui, &state.summary());
    ui.separator();

    let accents = generate_palette(crate::regions::REGIONS.len());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for region in &regions {
                let accent = crate::regions::REGIONS
                    .iter()
                    .position(|r| r.name == region.name)
                    .and_then(|i| accents.get(i).copied())
                    .unwrap_or(egui::Color32::GRAY);
                ui.label(
                    RichText::new(format!("🗺 {} India", region.name))
                        .heading()
                        .color(accent),
                );

                let trends = state.trends_in_region(region.name);
                if trends.is_empty() {
                    if !state.is_fetching() {
                        ui.label("No states found for this region.");
                    }
                    ui.separator();
                    continue;
                }

                // 2-column grid
                ui.columns(2, |cols| {
                    for (idx, trend) in trends.iter().enumerate() {
                        plot::trend_chart(&mut cols[idx % 2], trend, state.config.rolling_window);
                        cols[idx % 2].add_space(8.0);
                    }
                });
                ui.separator();
            }

            if !state.trends.is_empty() {
                egui::CollapsingHeader::new(RichText::new("All states").strong())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        summary::trend_table(ui, &state.trends);
                    });
            }
        });
}
