use super::model::{InterestSeries, Timeframe};

// ---------------------------------------------------------------------------
// Input collaborator: anything that can produce interest series
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fetches the interest series for one keyword in one geo over a window.
///
/// `Ok(None)` means the source has nothing for that geo/window. Callers
/// treat both `Ok(None)` and `Err` as "no data" for the state.
pub trait InterestSource {
    fn fetch(
        &mut self,
        keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
    ) -> Result<Option<InterestSeries>, SourceError>;

    /// Short description for the top bar.
    fn describe(&self) -> String;

    /// Drop any memoised results. No-op for sources without a cache.
    fn clear_cache(&mut self) {}
}
