use super::model::{InterestSeries, TrendClass};

// ---------------------------------------------------------------------------
// Trend classification
// ---------------------------------------------------------------------------

/// Days averaged at each end of the series.
pub const COMPARISON_SPAN: usize = 7;

/// Shortest series that can be classified (two non-overlapping spans).
pub const MIN_SERIES_LEN: usize = 2 * COMPARISON_SPAN;

/// Relative growth the recent span must exceed to count as picking up.
pub const DEFAULT_GROWTH_THRESHOLD: f64 = 0.10;

/// Outcome of comparing the first and last spans of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub class: TrendClass,
    pub baseline_avg: Option<f64>,
    pub recent_avg: Option<f64>,
}

/// Mean of the present values; `None` if every value is missing.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Classify a series with a relative growth threshold (0.10 = 10%).
///
/// The recent span must be *strictly* above `baseline * (1 + growth)`.
/// Too-short series, fully missing spans and a zero baseline are `NoData`.
pub fn classify(series: &InterestSeries, growth: f64) -> Classification {
    let values = series.values();
    if values.len() < MIN_SERIES_LEN {
        return Classification {
            class: TrendClass::NoData,
            baseline_avg: None,
            recent_avg: None,
        };
    }

    let baseline_avg = mean_present(&values[..COMPARISON_SPAN]);
    let recent_avg = mean_present(&values[values.len() - COMPARISON_SPAN..]);

    let class = match (baseline_avg, recent_avg) {
        (Some(baseline), Some(recent)) if baseline > 0.0 => {
            if recent > baseline * (1.0 + growth) {
                TrendClass::PickingUp
            } else {
                TrendClass::StableOrDeclining
            }
        }
        _ => TrendClass::NoData,
    };

    Classification {
        class,
        baseline_avg,
        recent_avg,
    }
}

/// Trailing moving average for the chart overlay.
///
/// Each output averages the present values among the last `window` inputs
/// (at least one is enough). A window with nothing present stays `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let lo = (i + 1).saturating_sub(window);
            mean_present(&values[lo..=i])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::data::model::InterestPoint;

    fn series(values: &[Option<f64>]) -> InterestSeries {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        InterestSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| InterestPoint::new(start + Duration::days(i as i64), *v))
                .collect(),
        )
    }

    fn flat(first: f64, middle: usize, last: f64) -> Vec<Option<f64>> {
        let mut v = vec![Some(first); COMPARISON_SPAN];
        v.extend(std::iter::repeat(Some(30.0)).take(middle));
        v.extend(std::iter::repeat(Some(last)).take(COMPARISON_SPAN));
        v
    }

    #[test]
    fn doubling_is_picking_up() {
        let c = classify(&series(&flat(10.0, 16, 20.0)), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::PickingUp);
        assert_eq!(c.baseline_avg, Some(10.0));
        assert_eq!(c.recent_avg, Some(20.0));
    }

    #[test]
    fn small_rise_is_stable() {
        let c = classify(&series(&flat(50.0, 0, 52.0)), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::StableOrDeclining);
    }

    #[test]
    fn exactly_ten_percent_is_not_picking_up() {
        let c = classify(&series(&flat(10.0, 3, 11.0)), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::StableOrDeclining);
    }

    #[test]
    fn decline_is_stable() {
        let c = classify(&series(&flat(60.0, 10, 20.0)), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::StableOrDeclining);
    }

    #[test]
    fn all_missing_is_no_data() {
        let c = classify(&series(&[None; 30]), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::NoData);
        assert_eq!(c.baseline_avg, None);
    }

    #[test]
    fn short_series_is_no_data() {
        let c = classify(&series(&[Some(5.0); MIN_SERIES_LEN - 1]), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::NoData);
    }

    #[test]
    fn zero_baseline_is_no_data() {
        let c = classify(&series(&flat(0.0, 0, 40.0)), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::NoData);
        assert_eq!(c.baseline_avg, Some(0.0));
    }

    #[test]
    fn missing_recent_span_is_no_data() {
        let mut v = flat(10.0, 5, 0.0);
        let n = v.len();
        v[n - COMPARISON_SPAN..].fill(None);
        let c = classify(&series(&v), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::NoData);
    }

    #[test]
    fn missing_baseline_span_is_no_data() {
        let mut v = flat(0.0, 5, 40.0);
        v[..COMPARISON_SPAN].fill(None);
        let c = classify(&series(&v), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.class, TrendClass::NoData);
        assert_eq!(c.baseline_avg, None);
        assert_eq!(c.recent_avg, Some(40.0));
    }

    #[test]
    fn partially_missing_spans_average_present_values() {
        let mut v = flat(10.0, 2, 20.0);
        v[0] = None;
        v[1] = None;
        v[2] = None;
        let n = v.len();
        v[n - 1] = None;
        let c = classify(&series(&v), DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(c.baseline_avg, Some(10.0));
        assert_eq!(c.recent_avg, Some(20.0));
        assert_eq!(c.class, TrendClass::PickingUp);
    }

    #[test]
    fn threshold_is_configurable() {
        let values = flat(10.0, 0, 12.0);
        assert_eq!(classify(&series(&values), 0.10).class, TrendClass::PickingUp);
        assert_eq!(classify(&series(&values), 0.25).class, TrendClass::StableOrDeclining);
    }

    #[test]
    fn mean_ignores_missing() {
        assert_eq!(mean_present(&[Some(2.0), None, Some(4.0)]), Some(3.0));
        assert_eq!(mean_present(&[None, None]), None);
        assert_eq!(mean_present(&[]), None);
    }

    #[test]
    fn rolling_mean_uses_partial_windows() {
        let v = [Some(1.0), Some(3.0), None, Some(5.0), Some(7.0)];
        let r = rolling_mean(&v, 2);
        assert_eq!(r, vec![Some(1.0), Some(2.0), Some(3.0), Some(5.0), Some(6.0)]);
    }

    #[test]
    fn rolling_mean_keeps_gaps_with_nothing_present() {
        let v = [None, None, Some(4.0)];
        assert_eq!(rolling_mean(&v, 1), vec![None, None, Some(4.0)]);
        assert_eq!(rolling_mean(&v, 0), vec![None, None, Some(4.0)]);
    }
}
