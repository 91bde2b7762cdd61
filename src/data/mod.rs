/// Data layer: sources, caching, classification and filtering.
///
/// Architecture:
/// ```text
///  Google Trends API        .csv / .json snapshot
///        │                         │
///        ▼                         ▼
///   ┌──────────┐            ┌────────────┐
///   │  google   │            │  snapshot   │   impl InterestSource
///   └──────────┘            └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  1h TTL per (keyword, geo, window)
///   └──────────┘
///        │  InterestSeries per state
///        ▼
///   ┌──────────┐
///   │ classify  │  first-7 vs last-7 average → TrendClass
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected regions → states to show
///   └──────────┘
/// ```

pub mod cache;
pub mod classify;
pub mod filter;
pub mod google;
pub mod loader;
pub mod model;
pub mod snapshot;
pub mod source;
