use chrono::{Duration, NaiveDate};
use eframe::egui::{RichText, Ui};
use egui_plot::{Line, LineStyle, Plot, Points};

use crate::color::{lighten, trend_color};
use crate::data::classify::rolling_mean;
use crate::data::model::{InterestSeries, StateTrend};

// ---------------------------------------------------------------------------
// Per-state interest chart
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 220.0;

/// `[day offset, value]` pairs, skipping missing days.
fn to_points(start: NaiveDate, series: &InterestSeries, values: &[Option<f64>]) -> Vec<[f64; 2]> {
    series
        .points()
        .iter()
        .zip(values)
        .filter_map(|(p, v)| v.map(|v| [(p.date - start).num_days() as f64, v]))
        .collect()
}

/// Render one state's chart with its trend badge, or a warning when empty.
pub fn trend_chart(ui: &mut Ui, trend: &StateTrend, rolling_window: usize) {
    ui.strong(trend.state);

    let Some(series) = trend.chartable() else {
        ui.colored_label(
            crate::color::NO_DATA,
            format!("No data for {}", trend.state),
        );
        return;
    };
    let Some(start) = series.first_date() else {
        return;
    };

    let color = trend_color(trend.class);
    let values = series.values();
    let rolling = rolling_mean(&values, rolling_window);

    Plot::new(("trend_chart", trend.geo))
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(105.0)
        .y_axis_label("Interest (0–100)")
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let date = start + Duration::days(mark.value.round() as i64);
            date.format("%b %d").to_string()
        })
        .label_formatter(move |_name, point| {
            let date = start + Duration::days(point.x.round() as i64);
            format!("{}\n{:.1}", date.format("%Y-%m-%d"), point.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(to_points(start, series, &values))
                    .name("interest")
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(to_points(start, series, &values))
                    .radius(2.0)
                    .color(color),
            );
            plot_ui.line(
                Line::new(to_points(start, series, &rolling))
                    .name(format!("{rolling_window}-point avg"))
                    .color(lighten(color, 0.2))
                    .style(LineStyle::dotted_dense())
                    .width(2.0),
            );
        });

    ui.label(RichText::new(trend.class.badge()).color(color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::InterestPoint;

    #[test]
    fn points_skip_missing_days() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let series = InterestSeries::new(vec![
            InterestPoint::new(start, Some(4.0)),
            InterestPoint::new(start + Duration::days(1), None),
            InterestPoint::new(start + Duration::days(2), Some(8.0)),
        ]);
        let points = to_points(start, &series, &series.values());
        assert_eq!(points, vec![[0.0, 4.0], [2.0, 8.0]]);
    }
}
