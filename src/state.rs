use std::collections::VecDeque;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::data::classify::{classify, Classification};
use crate::data::filter::{init_region_filter, states_for, toggle_region, RegionFilter};
use crate::data::loader;
use crate::data::model::{InterestSeries, StateTrend, Timeframe, TrendClass, TrendSummary};
use crate::data::source::InterestSource;
use crate::regions::{self, REGIONS};

// ---------------------------------------------------------------------------
// Refresh bookkeeping
// ---------------------------------------------------------------------------

/// States still waiting to be fetched for the current refresh.
#[derive(Debug, Clone)]
pub struct FetchProgress {
    pending: VecDeque<&'static str>,
    total: usize,
}

impl FetchProgress {
    /// Fraction done in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.total - self.pending.len()) as f32 / self.total as f32
    }

    /// The state that the next step will fetch.
    pub fn next_state(&self) -> Option<&'static str> {
        self.pending.front().copied()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Selected window length in days.
    pub window_days: u32,

    /// Regions whose states are shown.
    pub regions: RegionFilter,

    /// Where interest series come from (live API or snapshot).
    source: Box<dyn InterestSource>,

    /// Results of the current refresh, in display order.
    pub trends: Vec<StateTrend>,

    /// Window used by the current refresh.
    pub timeframe: Option<Timeframe>,

    /// In-flight refresh, if any.
    pub fetch: Option<FetchProgress>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config, source: Box<dyn InterestSource>) -> Self {
        Self {
            window_days: config.default_window_days,
            config,
            regions: init_region_filter(),
            source,
            trends: Vec::new(),
            timeframe: None,
            fetch: None,
            status_message: None,
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Drop previous results and queue one fetch per selected state.
    pub fn refresh(&mut self, today: NaiveDate) {
        let states = states_for(&self.regions);
        let timeframe = Timeframe::last_days(self.window_days, today);
        log::info!(
            "Refreshing '{}' for {} states over {}",
            self.config.keyword,
            states.len(),
            timeframe.to_query()
        );
        self.trends.clear();
        self.timeframe = Some(timeframe);
        self.fetch = (!states.is_empty()).then(|| FetchProgress {
            total: states.len(),
            pending: states.into(),
        });
    }

    /// Refresh using the local calendar date.
    pub fn refresh_now(&mut self) {
        self.refresh(Local::now().date_naive());
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch.is_some()
    }

    /// Fetch and classify the next queued state. Returns `true` while work remains.
    pub fn step_fetch(&mut self) -> bool {
        let (Some(progress), Some(timeframe)) = (self.fetch.as_mut(), self.timeframe) else {
            return false;
        };
        let Some(state) = progress.pending.pop_front() else {
            self.fetch = None;
            return false;
        };

        let series = match regions::geo_code(state) {
            Some(geo) => match self.source.fetch(&self.config.keyword, geo, &timeframe) {
                Ok(series) => {
                    log::debug!(
                        "{state}: {} points",
                        series.as_ref().map_or(0, |s| s.len())
                    );
                    series
                }
                Err(e) => {
                    log::warn!("Fetching {state} ({geo}) failed: {e}");
                    None
                }
            },
            None => {
                log::warn!("No geo code for {state}");
                None
            }
        };
        self.trends
            .push(build_trend(state, series, self.config.growth_threshold));

        let remaining = self.fetch.as_ref().is_some_and(|p| !p.pending.is_empty());
        if !remaining {
            self.fetch = None;
            let summary = self.summary();
            log::info!(
                "Refresh done for {} states: {} picking up, {} stable, {} no data",
                summary.total(),
                summary.picking_up.len(),
                summary.stable.len(),
                summary.no_data.len()
            );
        }
        remaining
    }

    pub fn summary(&self) -> TrendSummary {
        TrendSummary::from_trends(&self.trends)
    }

    /// Results belonging to one region, in that region's order.
    pub fn trends_in_region(&self, region: &str) -> Vec<&StateTrend> {
        self.trends.iter().filter(|t| t.region == region).collect()
    }

    // -- User actions that invalidate the current results --

    pub fn set_window(&mut self, days: u32) {
        if self.window_days != days {
            self.window_days = days;
            self.refresh_now();
        }
    }

    pub fn toggle_region(&mut self, name: &'static str) {
        toggle_region(&mut self.regions, name);
        self.refresh_now();
    }

    pub fn select_all_regions(&mut self) {
        self.regions = init_region_filter();
        self.refresh_now();
    }

    pub fn select_no_regions(&mut self) {
        self.regions.clear();
        self.refresh_now();
    }

    /// Swap the data source (live ↔ snapshot) and refetch.
    pub fn set_source(&mut self, source: Box<dyn InterestSource>) {
        log::info!("Switching source to {}", source.describe());
        self.source = source;
        self.status_message = None;
        self.refresh_now();
    }

    pub fn clear_cache(&mut self) {
        self.source.clear_cache();
        self.refresh_now();
    }

    /// Write current results as a CSV snapshot.
    pub fn export_csv(&mut self, path: &Path) {
        match loader::write_csv(path, &self.trends) {
            Ok(rows) => {
                log::info!("Exported {rows} rows to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Number of regions, for "n/m selected" style labels.
    pub fn region_count(&self) -> (usize, usize) {
        (self.regions.len(), REGIONS.len())
    }
}

fn build_trend(state: &'static str, series: Option<InterestSeries>, growth: f64) -> StateTrend {
    let Classification {
        class,
        baseline_avg,
        recent_avg,
    } = match &series {
        Some(s) => classify(s, growth),
        None => Classification {
            class: TrendClass::NoData,
            baseline_avg: None,
            recent_avg: None,
        },
    };
    StateTrend {
        state,
        region: regions::region_of(state).map_or("", |r| r.name),
        geo: regions::geo_code(state).unwrap_or(""),
        series,
        class,
        baseline_avg,
        recent_avg,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Duration;

    use super::*;
    use crate::data::model::InterestPoint;
    use crate::data::source::SourceError;

    /// In-memory source: rising series for listed geos, errors for `fail`.
    struct FakeSource {
        rising: Vec<&'static str>,
        fail: Vec<&'static str>,
        flat: BTreeMap<&'static str, f64>,
    }

    impl InterestSource for FakeSource {
        fn fetch(
            &mut self,
            _keyword: &str,
            geo: &str,
            timeframe: &Timeframe,
        ) -> Result<Option<InterestSeries>, SourceError> {
            if self.fail.iter().any(|g| *g == geo) {
                return Err(SourceError::Status {
                    code: 429,
                    body: "Too Many Requests".into(),
                });
            }
            let rising = self.rising.iter().any(|g| *g == geo);
            let value_at = |i: i64| -> Option<f64> {
                if rising {
                    Some(10.0 + i as f64 * 3.0)
                } else {
                    self.flat.get(geo).copied()
                }
            };
            if !rising && !self.flat.contains_key(geo) {
                return Ok(None);
            }
            let points = (0..=timeframe.days())
                .map(|i| InterestPoint::new(timeframe.start + Duration::days(i), value_at(i)))
                .collect();
            Ok(Some(InterestSeries::new(points)))
        }

        fn describe(&self) -> String {
            "fake".into()
        }
    }

    fn fetch_all(state: &mut AppState) {
        while state.step_fetch() {}
    }

    fn state_with(source: FakeSource) -> AppState {
        AppState::new(Config::default(), Box::new(source))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn refresh_classifies_every_selected_state() {
        let mut flat = BTreeMap::new();
        flat.insert("IN-GJ", 40.0);
        let mut state = state_with(FakeSource {
            rising: vec!["IN-MH"],
            fail: vec!["IN-GA"],
            flat,
        });
        state.regions = ["West"].into_iter().collect();
        state.refresh(today());

        assert!(state.is_fetching());
        assert_eq!(state.fetch.as_ref().and_then(|p| p.next_state()), Some("Maharashtra"));
        assert!(state.step_fetch());
        assert!(state.step_fetch());
        assert!(!state.step_fetch());
        assert!(!state.is_fetching());

        let summary = state.summary();
        assert_eq!(summary.picking_up, vec!["Maharashtra"]);
        assert_eq!(summary.stable, vec!["Gujarat"]);
        assert_eq!(summary.no_data, vec!["Goa"]);
        assert!(state.trends[2].series.is_none());
    }

    #[test]
    fn short_window_is_no_data() {
        let mut state = state_with(FakeSource {
            rising: vec!["IN-KA"],
            fail: vec![],
            flat: BTreeMap::new(),
        });
        state.regions = ["South"].into_iter().collect();
        state.window_days = 7;
        state.refresh(today());
        fetch_all(&mut state);

        let south = state.trends_in_region("South");
        let karnataka = south[0];
        assert_eq!(karnataka.state, "Karnataka");
        assert_eq!(karnataka.class, TrendClass::NoData);
        assert!(karnataka.chartable().is_some());
    }

    #[test]
    fn empty_region_selection_fetches_nothing() {
        let mut state = state_with(FakeSource {
            rising: vec![],
            fail: vec![],
            flat: BTreeMap::new(),
        });
        state.regions.clear();
        state.refresh(today());
        assert!(!state.is_fetching());
        assert!(!state.step_fetch());
        assert!(state.trends.is_empty());
    }

    #[test]
    fn progress_advances_per_step() {
        let mut state = state_with(FakeSource {
            rising: vec![],
            fail: vec![],
            flat: BTreeMap::new(),
        });
        state.regions = ["Central"].into_iter().collect();
        state.refresh(today());
        assert_eq!(state.fetch.as_ref().map(|p| p.fraction()), Some(0.0));
        state.step_fetch();
        assert_eq!(state.fetch.as_ref().map(|p| p.fraction()), Some(0.5));
        state.step_fetch();
        assert!(state.fetch.is_none());
        assert_eq!(state.summary().no_data.len(), 2);
    }

    #[test]
    fn export_writes_current_results() {
        let mut state = state_with(FakeSource {
            rising: vec!["IN-DL"],
            fail: vec![],
            flat: BTreeMap::new(),
        });
        state.regions = ["North"].into_iter().collect();
        state.refresh(today());
        fetch_all(&mut state);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        state.export_csv(&path);
        assert!(state.status_message.is_none());
        let snap = loader::load_file(&path).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.series["IN-DL"].len(), 31);
    }
}
