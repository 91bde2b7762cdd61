use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

use super::model::{InterestPoint, InterestSeries, Timeframe};
use super::source::{InterestSource, SourceError};

// ---------------------------------------------------------------------------
// Google Trends web API client
// ---------------------------------------------------------------------------
//
//  GET /?geo=IN                          → session cookie
//  GET /trends/api/explore               → widgets, pick id == "TIMESERIES"
//  GET /trends/api/widgetdata/multiline  → default.timelineData[]
//
// Every JSON body is prefixed with an anti-hijacking line such as `)]}'`.

const HOME_URL: &str = "https://trends.google.com/";
const EXPLORE_URL: &str = "https://trends.google.com/trends/api/explore";
const MULTILINE_URL: &str = "https://trends.google.com/trends/api/widgetdata/multiline";

const MAX_RESPONSE_BYTES: u64 = 4 * 1024 * 1024;

/// Connection settings for [`GoogleTrends`].
#[derive(Debug, Clone)]
pub struct GoogleTrendsOptions {
    /// Host language, e.g. `en-US`.
    pub language: String,
    /// Timezone offset in minutes as Trends expects it (India: 330).
    pub tz_offset_minutes: i32,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

pub struct GoogleTrends {
    agent: ureq::Agent,
    options: GoogleTrendsOptions,
    cookie_primed: bool,
}

impl GoogleTrends {
    pub fn new(options: GoogleTrendsOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(options.connect_timeout)
            .timeout_read(options.read_timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) trend-pulse")
            .build();
        Self {
            agent,
            options,
            cookie_primed: false,
        }
    }

    /// Country part of the host language (`en-US` → `US`).
    fn home_geo(&self) -> &str {
        self.options
            .language
            .rsplit('-')
            .next()
            .unwrap_or("US")
    }

    fn prime_cookie(&mut self) {
        if self.cookie_primed {
            return;
        }
        self.cookie_primed = true;
        let geo = self.home_geo().to_string();
        if let Err(e) = self.agent.get(HOME_URL).query("geo", &geo).call() {
            log::warn!("Could not prime Trends session cookie: {e}");
        }
    }

    fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<JsonValue, SourceError> {
        let mut request = self.agent.get(url);
        for (k, v) in params {
            request = request.query(k, v);
        }
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body(response).unwrap_or_else(|e| e.to_string());
                return Err(SourceError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(SourceError::Transport(err.to_string()));
            }
        };
        let body = read_body(response)?;
        parse_prefixed_json(&body)
    }

    fn timeseries_widget(
        &self,
        keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
    ) -> Result<Widget, SourceError> {
        let req = json!({
            "comparisonItem": [{
                "keyword": keyword,
                "time": timeframe.to_query(),
                "geo": geo,
            }],
            "category": 0,
            "property": "",
        })
        .to_string();
        let tz = self.options.tz_offset_minutes.to_string();
        let explore = self.get_json(
            EXPLORE_URL,
            &[
                ("hl", self.options.language.as_str()),
                ("tz", tz.as_str()),
                ("req", req.as_str()),
            ],
        )?;
        find_timeseries_widget(explore)
    }
}

impl InterestSource for GoogleTrends {
    fn fetch(
        &mut self,
        keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
    ) -> Result<Option<InterestSeries>, SourceError> {
        self.prime_cookie();
        let widget = self.timeseries_widget(keyword, geo, timeframe)?;
        let req = widget.request.to_string();
        let tz = self.options.tz_offset_minutes.to_string();
        let body = self.get_json(
            MULTILINE_URL,
            &[
                ("hl", self.options.language.as_str()),
                ("tz", tz.as_str()),
                ("req", req.as_str()),
                ("token", widget.token.as_str()),
            ],
        )?;
        parse_timeline(body)
    }

    fn describe(&self) -> String {
        format!("Google Trends ({})", self.options.language)
    }
}

fn read_body(response: ureq::Response) -> Result<String, SourceError> {
    use std::io::Read;

    let mut body = String::new();
    response
        .into_reader()
        .take(MAX_RESPONSE_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;
    Ok(body)
}

// -- Response parsing (pure, tested without network) --

/// Skip the anti-JSON prefix and parse the remainder.
pub fn parse_prefixed_json(body: &str) -> Result<JsonValue, SourceError> {
    // The prefix only ever holds closing brackets, so the first opener starts the payload.
    let start = body
        .find(|c: char| c == '{' || c == '[')
        .ok_or_else(|| SourceError::InvalidResponse("no JSON payload".into()))?;
    Ok(serde_json::from_str(&body[start..])?)
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: String,
    request: JsonValue,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

fn find_timeseries_widget(explore: JsonValue) -> Result<Widget, SourceError> {
    let response: ExploreResponse = serde_json::from_value(explore)?;
    response
        .widgets
        .into_iter()
        .find(|w| w.id == "TIMESERIES")
        .ok_or_else(|| SourceError::InvalidResponse("no TIMESERIES widget".into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineEntry {
    time: String,
    #[serde(default)]
    value: Vec<f64>,
    #[serde(default)]
    has_data: Vec<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineDefault {
    #[serde(default)]
    timeline_data: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: TimelineDefault,
}

fn entry_date(entry: &TimelineEntry) -> Result<NaiveDate, SourceError> {
    let secs: i64 = entry
        .time
        .parse()
        .map_err(|_| SourceError::InvalidResponse(format!("bad timestamp '{}'", entry.time)))?;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| SourceError::InvalidResponse(format!("timestamp out of range: {secs}")))
}

/// Turn a multiline payload into a series; an empty timeline is `None`.
fn parse_timeline(body: JsonValue) -> Result<Option<InterestSeries>, SourceError> {
    let response: MultilineResponse = serde_json::from_value(body)?;
    let entries = response.default.timeline_data;
    if entries.is_empty() {
        return Ok(None);
    }

    let points = entries
        .iter()
        .map(|entry| {
            let date = entry_date(entry)?;
            let present = entry.has_data.first().copied().unwrap_or(true);
            let value = entry.value.first().copied().filter(|_| present);
            Ok(InterestPoint::new(date, value))
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    Ok(Some(InterestSeries::new(points)))
}
