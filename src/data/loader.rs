use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{InterestPoint, InterestSeries, StateTrend};
use crate::regions;

// ---------------------------------------------------------------------------
// Snapshot – interest series per geo code, read from disk
// ---------------------------------------------------------------------------

/// Offline copy of Trends data: one series per geo code (upper-case).
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Keyword recorded in the file, if the format carries one.
    pub keyword: Option<String>,
    pub series: BTreeMap<String, InterestSeries>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Geo codes in the file that match no known state.
    pub fn unknown_geos(&self) -> Vec<&str> {
        self.series
            .keys()
            .filter(|geo| regions::state_for_geo(geo).is_none())
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a snapshot from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – columns `date`, `geo`, `interest` (empty = missing); `state` is ignored
/// * `.json` – `{ "keyword": "...", "series": { "IN-DL": [{ "date": ..., "value": ... }] } }`
pub fn load_file(path: &Path) -> Result<Snapshot> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    geo: String,
    interest: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CsvExportRow<'a> {
    date: NaiveDate,
    geo: &'a str,
    state: &'a str,
    interest: Option<f64>,
}

fn load_csv(path: &Path) -> Result<Snapshot> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut grouped: BTreeMap<String, Vec<InterestPoint>> = BTreeMap::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        grouped
            .entry(row.geo.trim().to_ascii_uppercase())
            .or_default()
            .push(InterestPoint::new(row.date, row.interest));
    }

    Ok(Snapshot {
        keyword: None,
        series: into_series(grouped)?,
    })
}

/// Write trends in the CSV snapshot layout so the file can be reopened.
pub fn write_csv<'a>(
    path: &Path,
    trends: impl IntoIterator<Item = &'a StateTrend>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    let mut rows = 0;
    for trend in trends {
        let Some(series) = &trend.series else {
            continue;
        };
        for p in series.points() {
            writer
                .serialize(CsvExportRow {
                    date: p.date,
                    geo: trend.geo,
                    state: trend.state,
                    interest: p.value,
                })
                .with_context(|| format!("writing row for {}", trend.state))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonSnapshot {
    #[serde(default)]
    keyword: Option<String>,
    series: BTreeMap<String, Vec<InterestPoint>>,
}

fn load_json(path: &Path) -> Result<Snapshot> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let parsed: JsonSnapshot = serde_json::from_str(&text).context("parsing JSON snapshot")?;

    let grouped = parsed
        .series
        .into_iter()
        .map(|(geo, points)| (geo.trim().to_ascii_uppercase(), points))
        .collect();

    Ok(Snapshot {
        keyword: parsed.keyword,
        series: into_series(grouped)?,
    })
}

/// Group points into series, rejecting interest values outside `0..=100`.
fn into_series(
    grouped: BTreeMap<String, Vec<InterestPoint>>,
) -> Result<BTreeMap<String, InterestSeries>> {
    grouped
        .into_iter()
        .map(|(geo, points)| {
            for p in &points {
                if let Some(v) = p.value.filter(|v| !(0.0..=100.0).contains(v)) {
                    bail!("{geo} on {}: interest {v} outside 0..=100", p.date);
                }
            }
            Ok((geo, InterestSeries::new(points)))
        })
        .collect()
}
