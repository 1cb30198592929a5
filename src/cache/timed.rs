//! Thread-safe cache handle.
//!
//! The whole engine (key index, recency list with its sentinels, counters)
//! is one exclusion domain behind a single `parking_lot::Mutex`. Every
//! operation holds the guard for its full duration; the guard is scoped, so
//! early returns on the miss and expiry paths release it too.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheOutcome, CacheStats, CacheStore, Clock, MonotonicClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Timed LRU Cache ==
/// Fixed-capacity LRU cache with a cache-wide TTL, shareable across threads.
///
/// Cloning is cheap and yields another handle to the same cache.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use timed_lru::{CacheOutcome, ManualClock, TimedLruCache};
///
/// let clock = ManualClock::new();
/// let cache = TimedLruCache::new(2, Duration::from_secs(100), clock.clone()).unwrap();
///
/// cache.set("a", 1);
/// assert_eq!(cache.get("a"), (Some(1), CacheOutcome::Hit));
///
/// clock.advance(Duration::from_secs(100));
/// assert_eq!(cache.get("a"), (None, CacheOutcome::Miss));
/// assert_eq!(cache.stats().expirations, 1);
/// ```
pub struct TimedLruCache<K, V, C = MonotonicClock> {
    inner: Arc<Mutex<CacheStore<K, V, C>>>,
}

impl<K, V> TimedLruCache<K, V, MonotonicClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache reading time from a [`MonotonicClock`].
    pub fn with_monotonic_clock(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::new(capacity, ttl, MonotonicClock::new())
    }

    /// Creates a cache from a validated [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::with_monotonic_clock(config.capacity, config.ttl)
    }
}

impl<K, V, C> TimedLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` live entries, each living
    /// `ttl` after its last write as measured by `clock`.
    ///
    /// # Errors
    /// Fails fast on a zero capacity or zero TTL.
    pub fn new(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        let store = CacheStore::new(capacity, ttl, clock)?;
        info!("Cache initialized: capacity={}, ttl={:?}", capacity, ttl);
        Ok(Self {
            inner: Arc::new(Mutex::new(store)),
        })
    }

    /// Looks up `key`, refreshing its recency on a hit.
    ///
    /// An entry read at or after its deadline is dropped and reported as a
    /// miss, counted once as an expiration.
    pub fn get<Q>(&self, key: &Q) -> (Option<V>, CacheOutcome)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key)
    }

    /// Writes `value` under `key` with a fresh TTL and marks it most
    /// recently used.
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry.
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value)
    }

    /// Consistent snapshot of size, capacity and all counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Zeroes all counters without touching cached data.
    pub fn reset_stats(&self) {
        self.inner.lock().reset_stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.lock().ttl()
    }

    /// Checks index and recency list consistency under the lock.
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V, C> Clone for TimedLruCache<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, C> fmt::Debug for TimedLruCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.lock();
        f.debug_struct("TimedLruCache")
            .field("store", &*store)
            .finish()
    }
}
