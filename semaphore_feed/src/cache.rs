//! Time-to-live cache for quote series.
//!
//! `TtlCache` is a plain map from key to `(value, expiry)`. Expiry is checked on
//! every read against the `Instant` passed in by the caller, so the cache holds
//! no clock of its own and behaves deterministically under test.
//!
//! `CachedSource` wraps any `QuoteSource` and serves repeated requests for the
//! same `(symbol, period, interval)` from a `TtlCache` until the sampling's TTL
//! runs out. Only successful, non-empty answers are stored; a failed request is
//! retried on the next call.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::debug;
use semaphore_common::{FetchError, PricePoint, Sampling};

use crate::source::QuoteSource;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current monotonic instant.
    fn now(&self) -> Instant;
}

/// `Clock` reading `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Map whose entries expire a fixed time after insertion.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Fresh value for `key`; an expired entry is dropped and reported as a miss.
    pub fn get(&mut self, key: &K, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` until `now + ttl`, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V, ttl: Duration, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// `(symbol, period, interval)`
type CacheKey = (String, &'static str, &'static str);

/// `QuoteSource` decorator memoizing answers for the sampling's TTL.
pub struct CachedSource<S, C = SystemClock> {
    inner: S,
    clock: C,
    cache: Mutex<TtlCache<CacheKey, Vec<PricePoint>>>,
}

impl<S: QuoteSource> CachedSource<S> {
    /// Wraps `inner` using the system clock.
    pub fn new(inner: S) -> Self {
        Self::with_clock(inner, SystemClock)
    }
}

impl<S: QuoteSource, C: Clock> CachedSource<S, C> {
    /// Wraps `inner` using `clock` for expiry checks.
    pub fn with_clock(inner: S, clock: C) -> Self {
        Self {
            inner,
            clock,
            cache: Mutex::new(TtlCache::new()),
        }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: QuoteSource, C: Clock> QuoteSource for CachedSource<S, C> {
    fn fetch(&self, symbol: &str, sampling: &Sampling) -> Result<Vec<PricePoint>, FetchError> {
        let key: CacheKey = (String::from(symbol), sampling.period, sampling.interval);

        {
            // The map stays consistent even if a holder panicked.
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            let now = self.clock.now();
            let purged = cache.purge_expired(now);
            if purged > 0 {
                debug!("Purged {} expired cache entries", purged);
            }
            if let Some(series) = cache.get(&key, now) {
                debug!("Cache hit for {} ({}/{})", symbol, sampling.period, sampling.interval);
                return Ok(series);
            }
        }

        let series = self.inner.fetch(symbol, sampling)?;
        if !series.is_empty() {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.insert(key, series.clone(), sampling.ttl, self.clock.now());
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_is_fresh_until_ttl() {
        let start = Instant::now();
        let ttl = Duration::from_secs(20);
        let mut cache = TtlCache::new();
        cache.insert("ES=F", 1.0, ttl, start);

        assert_eq!(cache.get(&"ES=F", start), Some(1.0));
        assert_eq!(cache.get(&"ES=F", start + Duration::from_secs(19)), Some(1.0));
        assert_eq!(cache.get(&"ES=F", start + ttl), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces_and_restarts_ttl() {
        let start = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut cache = TtlCache::new();
        cache.insert("DX=F", 1.0, ttl, start);
        cache.insert("DX=F", 2.0, ttl, start + Duration::from_secs(8));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"DX=F", start + Duration::from_secs(15)), Some(2.0));
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let start = Instant::now();
        let mut cache = TtlCache::new();
        cache.insert("ES=F", 1.0, Duration::from_secs(20), start);
        cache.insert("^TNX", 2.0, Duration::from_secs(60), start);

        assert_eq!(cache.purge_expired(start + Duration::from_secs(30)), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"^TNX", start + Duration::from_secs(30)), Some(2.0));
    }

    #[test]
    fn missing_key_is_a_miss() {
        let mut cache: TtlCache<&str, f64> = TtlCache::default();
        assert_eq!(cache.get(&"ES=F", Instant::now()), None);
    }
}
