use chrono::Duration;

use super::loader::Snapshot;
use super::model::{InterestSeries, Timeframe};
use super::source::{InterestSource, SourceError};

/// Serves interest series from a loaded snapshot file.
///
/// Windows are anchored at the snapshot's own last date rather than today,
/// so an old export still shows its final `days` days.
pub struct SnapshotSource {
    label: String,
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(label: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
        }
    }
}

impl InterestSource for SnapshotSource {
    fn fetch(
        &mut self,
        _keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
    ) -> Result<Option<InterestSeries>, SourceError> {
        let Some(series) = self.snapshot.series.get(&geo.to_ascii_uppercase()) else {
            return Ok(None);
        };
        let Some(latest) = series.last_date() else {
            return Ok(None);
        };
        let window = series.between(latest - Duration::days(timeframe.days()), latest);
        Ok((!window.is_empty()).then_some(window))
    }

    fn describe(&self) -> String {
        match &self.snapshot.keyword {
            Some(kw) => format!("Snapshot {} [{kw}]", self.label),
            None => format!("Snapshot {}", self.label),
        }
    }
}
