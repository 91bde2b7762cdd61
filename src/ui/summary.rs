use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{trend_color, NO_DATA, PICKING_UP, STABLE};
use crate::data::model::{StateTrend, TrendSummary};

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

fn metric(ui: &mut Ui, title: &str, count: usize, color: egui::Color32) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(title);
        ui.label(RichText::new(count.to_string()).size(28.0).strong().color(color));
    });
}

/// Three counters: picking up / stable / no data.
pub fn metrics_row(ui: &mut Ui, summary: &TrendSummary) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "📈 Picking Up", summary.picking_up.len(), PICKING_UP);
        metric(&mut cols[1], "📉 Stable / Declining", summary.stable.len(), STABLE);
        metric(&mut cols[2], "⚠ No Data", summary.no_data.len(), NO_DATA);
    });
}

// ---------------------------------------------------------------------------
// Per-state table
// ---------------------------------------------------------------------------

fn fmt_avg(v: Option<f64>) -> String {
    v.map_or_else(|| "–".to_string(), |v| format!("{v:.1}"))
}

/// Growth of the recent average over the baseline, as a percentage.
fn growth_pct(trend: &StateTrend) -> Option<f64> {
    match (trend.baseline_avg, trend.recent_avg) {
        (Some(b), Some(r)) if b > 0.0 => Some((r / b - 1.0) * 100.0),
        _ => None,
    }
}

pub fn trend_table(ui: &mut Ui, trends: &[StateTrend]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["State", "Region", "First 7d", "Last 7d", "Change", "Trend"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for trend in trends {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(trend.state);
                    });
                    row.col(|ui| {
                        ui.label(trend.region);
                    });
                    row.col(|ui| {
                        ui.label(fmt_avg(trend.baseline_avg));
                    });
                    row.col(|ui| {
                        ui.label(fmt_avg(trend.recent_avg));
                    });
                    row.col(|ui| {
                        let change = growth_pct(trend)
                            .map_or_else(|| "–".to_string(), |g| format!("{g:+.0}%"));
                        ui.label(change);
                    });
                    row.col(|ui| {
                        ui.colored_label(trend_color(trend.class), trend.class.label());
                    });
                });
            }
        });
}
