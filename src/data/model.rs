use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InterestPoint – one day of search interest
// ---------------------------------------------------------------------------

/// A single day of Google Trends interest. `value` is `None` when Trends
/// reports no data for that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl InterestPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

// ---------------------------------------------------------------------------
// InterestSeries – the ordered series for one state
// ---------------------------------------------------------------------------

/// Date-ordered interest values for one state over one window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterestSeries {
    points: Vec<InterestPoint>,
}

impl InterestSeries {
    /// Build a series, sorting by date.
    pub fn new(mut points: Vec<InterestPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn points(&self) -> &[InterestPoint] {
        &self.points
    }

    /// Values in date order, `None` where data is missing.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether at least one day carries a value.
    pub fn has_data(&self) -> bool {
        self.points.iter().any(|p| p.value.is_some())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Points with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Timeframe – the requested window
// ---------------------------------------------------------------------------

/// Selectable window lengths, in days.
pub const WINDOW_CHOICES: [u32; 5] = [7, 14, 30, 60, 90];

/// Inclusive date range requested from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Timeframe {
    /// The last `days` days ending at `today`.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// `"YYYY-MM-DD YYYY-MM-DD"`, the form Google Trends expects.
    pub fn to_query(&self) -> String {
        format!(
            "{} {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// ---------------------------------------------------------------------------
// TrendClass – classification result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrendClass {
    PickingUp,
    StableOrDeclining,
    NoData,
}

impl TrendClass {
    pub fn label(self) -> &'static str {
        match self {
            TrendClass::PickingUp => "Picking Up",
            TrendClass::StableOrDeclining => "Stable / Declining",
            TrendClass::NoData => "No Data",
        }
    }

    /// Caption shown under a chart.
    pub fn badge(self) -> &'static str {
        match self {
            TrendClass::PickingUp => "📈 Picking Up",
            TrendClass::StableOrDeclining => "📉 Stable / Declining",
            TrendClass::NoData => "⚠ No Data",
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StateTrend – everything the UI needs for one state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StateTrend {
    pub state: &'static str,
    pub region: &'static str,
    pub geo: &'static str,
    /// `None` when the source returned nothing or failed.
    pub series: Option<InterestSeries>,
    pub class: TrendClass,
    /// Mean of the first comparison span, when defined.
    pub baseline_avg: Option<f64>,
    /// Mean of the last comparison span, when defined.
    pub recent_avg: Option<f64>,
}

impl StateTrend {
    /// Series worth charting: present and with at least one value.
    pub fn chartable(&self) -> Option<&InterestSeries> {
        self.series.as_ref().filter(|s| s.has_data())
    }
}

/// States bucketed by classification, each list in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSummary {
    pub picking_up: Vec<&'static str>,
    pub stable: Vec<&'static str>,
    pub no_data: Vec<&'static str>,
}

impl TrendSummary {
    pub fn from_trends<'a>(trends: impl IntoIterator<Item = &'a StateTrend>) -> Self {
        let mut summary = TrendSummary::default();
        for t in trends {
            match t.class {
                TrendClass::PickingUp => summary.picking_up.push(t.state),
                TrendClass::StableOrDeclining => summary.stable.push(t.state),
                TrendClass::NoData => summary.no_data.push(t.state),
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.picking_up.len() + self.stable.len() + self.no_data.len()
    }
}
