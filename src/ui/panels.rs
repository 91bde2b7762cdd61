use eframe::egui::{self, Color32, RichText, Ui};

use crate::app::live_source;
use crate::color::generate_palette;
use crate::data::loader;
use crate::data::model::WINDOW_CHOICES;
use crate::data::snapshot::SnapshotSource;
use crate::regions::REGIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – window and region filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("🦟 {} Trends", capitalize(&state.config.keyword)));
    ui.label(format!(
        "Google Trends data for \"{}\" across Indian states.",
        state.config.keyword
    ));
    ui.separator();

    // ---- Time period ----
    ui.strong("Time Period");
    let mut days = state.window_days;
    egui::ComboBox::from_id_salt("time_period")
        .selected_text(format!("Last {days} days"))
        .show_ui(ui, |ui: &mut Ui| {
            for choice in WINDOW_CHOICES {
                ui.selectable_value(&mut days, choice, format!("Last {choice} days"));
            }
        });
    state.set_window(days);
    ui.separator();

    // ---- Region filter ----
    let (n_selected, n_total) = state.region_count();
    ui.strong(format!("Filter by Region  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_regions();
        }
        if ui.small_button("None").clicked() {
            state.select_no_regions();
        }
    });

    let accents = generate_palette(REGIONS.len());
    for (region, accent) in REGIONS.iter().zip(accents) {
        let mut checked = state.regions.contains(region.name);
        let text =
            RichText::new(format!("{} ({})", region.name, region.states.len())).color(accent);
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_region(region.name);
        }
    }
    ui.separator();

    ui.add_enabled_ui(!state.is_fetching(), |ui: &mut Ui| {
        if ui.button("⟳ Refresh").clicked() {
            state.refresh_now();
        }
    });
    ui.add_space(4.0);
    ui.small(refresh_caption(state.config.cache_ttl_secs));
}

fn refresh_caption(ttl_secs: u64) -> String {
    match ttl_secs {
        3600 => "Data refreshes every hour.".to_string(),
        s if s > 0 && s % 3600 == 0 => format!("Data refreshes every {} hours.", s / 3600),
        s => format!("Data refreshes every {} minutes.", s.div_ceil(60)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open snapshot…").clicked() {
                open_snapshot_dialog(state);
                ui.close_menu();
            }
            if ui.button("Use Google Trends").clicked() {
                let source = live_source(&state.config);
                state.set_source(source);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(!state.trends.is_empty(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear cache").clicked() {
                state.clear_cache();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.source_description());

        if let Some(tf) = &state.timeframe {
            ui.separator();
            ui.label(tf.to_query());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_snapshot_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open interest snapshot")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match loader::load_file(&path) {
        Ok(snapshot) if snapshot.is_empty() => {
            state.status_message = Some(format!("Error: {} has no rows", path.display()));
        }
        Ok(snapshot) => {
            let unknown = snapshot.unknown_geos();
            if !unknown.is_empty() {
                log::warn!("Ignoring unknown geo codes: {unknown:?}");
            }
            log::info!(
                "Loaded snapshot with {} geos from {}",
                snapshot.len(),
                path.display()
            );
            let label = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_source(Box::new(SnapshotSource::new(label, snapshot)));
        }
        Err(e) => {
            log::error!("Failed to load snapshot: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export interest data")
        .add_filter("CSV", &["csv"])
        .set_file_name(format!("{}_trends.csv", state.config.keyword))
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("mosquito"), "Mosquito");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn refresh_caption_uses_hours_when_whole() {
        assert_eq!(refresh_caption(3600), "Data refreshes every hour.");
        assert_eq!(refresh_caption(7200), "Data refreshes every 2 hours.");
        assert_eq!(refresh_caption(900), "Data refreshes every 15 minutes.");
    }
}
