use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::model::{InterestSeries, Timeframe};
use super::source::{InterestSource, SourceError};

// ---------------------------------------------------------------------------
// TtlCache – entries expire a fixed time after insertion
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh value for `key` as seen at `now`; expired entries are evicted.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let (inserted, value) = self.entries.get(key)?;
        if now.saturating_duration_since(*inserted) < self.ttl {
            return Some(value.clone());
        }
        self.entries.remove(key);
        None
    }

    /// Insert `value`, evicting every entry that has already expired.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (inserted, _)| now.saturating_duration_since(*inserted) < ttl);
        self.entries.insert(key, (now, value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// CachedSource – memoises successful fetches of an inner source
// ---------------------------------------------------------------------------

type CacheKey = (String, String, String);

/// Wraps a source so repeated requests within the TTL skip the network.
/// Failures are never cached.
pub struct CachedSource<S> {
    inner: S,
    cache: TtlCache<CacheKey, Option<InterestSeries>>,
}

impl<S: InterestSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }

    fn fetch_at(
        &mut self,
        keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
        now: Instant,
    ) -> Result<Option<InterestSeries>, SourceError> {
        let key = (keyword.to_string(), geo.to_string(), timeframe.to_query());
        if let Some(hit) = self.cache.get_at(&key, now) {
            log::debug!("cache hit for {geo} {}", key.2);
            return Ok(hit);
        }
        let fetched = self.inner.fetch(keyword, geo, timeframe)?;
        self.cache.insert_at(key, fetched.clone(), now);
        Ok(fetched)
    }
}

impl<S: InterestSource> InterestSource for CachedSource<S> {
    fn fetch(
        &mut self,
        keyword: &str,
        geo: &str,
        timeframe: &Timeframe,
    ) -> Result<Option<InterestSeries>, SourceError> {
        self.fetch_at(keyword, geo, timeframe, Instant::now())
    }

    fn describe(&self) -> String {
        format!("{} (cached {} entries)", self.inner.describe(), self.cache.len())
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
        self.inner.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::InterestPoint;

    #[test]
    fn entries_expire_after_ttl() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(3600));
        cache.insert_at("k", 1, start);
        assert_eq!(cache.get_at(&"k", start + Duration::from_secs(3599)), Some(1));
        assert_eq!(cache.get_at(&"k", start + Duration::from_secs(3600)), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_evicts_stale_keys() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(3600));
        cache.insert_at("2024-06-01 2024-07-01", 1, start);
        cache.insert_at("2024-06-02 2024-07-02", 2, start + Duration::from_secs(1800));
        assert_eq!(cache.len(), 2);

        cache.insert_at("2024-06-03 2024-07-03", 3, start + Duration::from_secs(4000));
        assert_eq!(cache.len(), 2);
        let later = start + Duration::from_secs(4000);
        assert_eq!(cache.get_at(&"2024-06-01 2024-07-01", later), None);
        assert_eq!(
            cache.get_at(&"2024-06-02 2024-07-02", later),
            Some(2)
        );
    }

    struct CountingSource {
        calls: usize,
        fail: bool,
    }

    impl InterestSource for CountingSource {
        fn fetch(
            &mut self,
            _keyword: &str,
            _geo: &str,
            timeframe: &Timeframe,
        ) -> Result<Option<InterestSeries>, SourceError> {
            self.calls += 1;
            if self.fail {
                return Err(SourceError::Transport("offline".into()));
            }
            Ok(Some(InterestSeries::new(vec![InterestPoint::new(
                timeframe.end,
                Some(42.0),
            )])))
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    fn timeframe() -> Timeframe {
        Timeframe::last_days(30, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
    }

    #[test]
    fn repeated_fetch_hits_cache() {
        let mut source = CachedSource::new(
            CountingSource { calls: 0, fail: false },
            Duration::from_secs(3600),
        );
        let now = Instant::now();
        let tf = timeframe();
        source.fetch_at("mosquito", "IN-DL", &tf, now).unwrap();
        source.fetch_at("mosquito", "IN-DL", &tf, now).unwrap();
        assert_eq!(source.inner.calls, 1);

        source.fetch_at("mosquito", "IN-KL", &tf, now).unwrap();
        assert_eq!(source.inner.calls, 2);

        source
            .fetch_at("mosquito", "IN-DL", &tf, now + Duration::from_secs(7200))
            .unwrap();
        assert_eq!(source.inner.calls, 3);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut source = CachedSource::new(
            CountingSource { calls: 0, fail: true },
            Duration::from_secs(3600),
        );
        let now = Instant::now();
        assert!(source.fetch_at("mosquito", "IN-DL", &timeframe(), now).is_err());
        assert!(source.fetch_at("mosquito", "IN-DL", &timeframe(), now).is_err());
        assert_eq!(source.inner.calls, 2);
    }

    #[test]
    fn clear_cache_forces_refetch() {
        let mut source = CachedSource::new(
            CountingSource { calls: 0, fail: false },
            Duration::from_secs(3600),
        );
        let now = Instant::now();
        source.fetch_at("mosquito", "IN-DL", &timeframe(), now).unwrap();
        source.clear_cache();
        source.fetch_at("mosquito", "IN-DL", &timeframe(), now).unwrap();
        assert_eq!(source.inner.calls, 2);
    }
}
