//! Cache Store Module
//!
//! Cache engine combining the key index with the recency list and lazy TTL
//! expiration. `CacheStore` is not synchronized on its own; see
//! [`TimedLruCache`](crate::cache::TimedLruCache) for the shared wrapper.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, RecencyList, SlotId};
use crate::error::{CacheError, Result};

// == Cache Outcome ==
/// Whether a lookup found a live value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOutcome::Hit => "HIT",
            CacheOutcome::Miss => "MISS",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheOutcome::Hit)
    }
}

impl fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Store ==
/// Fixed-capacity LRU storage with a single cache-wide TTL.
pub struct CacheStore<K, V, C> {
    /// Key -> slot of the owning entry
    index: HashMap<K, SlotId>,
    /// Live entries, most recently used first
    recency: RecencyList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// Lifetime granted by every write
    ttl: Duration,
    clock: C,
}

impl<K, V, C> CacheStore<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Errors
    /// [`CacheError::ZeroCapacity`] or [`CacheError::ZeroTtl`] when either
    /// bound is zero.
    pub fn new(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        if ttl.is_zero() {
            return Err(CacheError::ZeroTtl);
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            recency: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Looks up `key`, refreshing its recency on a hit.
    ///
    /// An entry found past its deadline is destroyed and reported as a miss
    /// and an expiration. No other entries are inspected.
    pub fn get<Q>(&mut self, key: &Q) -> (Option<V>, CacheOutcome)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stats.record_get();

        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                self.stats.record_miss();
                return (None, CacheOutcome::Miss);
            }
        };

        let now = self.clock.now();
        let expired = self
            .recency
            .get(id)
            .map_or(true, |entry| entry.is_expired(now));

        if expired {
            self.recency.remove(id);
            self.index.remove(key);
            self.stats.record_miss();
            self.stats.record_expiration();
            trace!("Expired entry dropped on read (slot {})", id.index());
            return (None, CacheOutcome::Miss);
        }

        self.recency.move_to_front(id);
        self.stats.record_hit();
        let value = self.recency.get(id).map(|entry| entry.value.clone());
        (value, CacheOutcome::Hit)
    }

    // == Set ==
    /// Stores `value` under `key` with a fresh deadline of `now + ttl`.
    ///
    /// An existing entry is updated in place and moved to the front, even if
    /// it had already expired. A new key may push the least recently used
    /// entries out; each one is counted as an expiration if its deadline has
    /// passed when it is evicted, otherwise as a removal.
    pub fn set(&mut self, key: K, value: V) {
        self.stats.record_set();
        let now = self.clock.now();

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.recency.get_mut(id) {
                entry.refresh(value, now, self.ttl);
                self.recency.move_to_front(id);
                return;
            }
        }

        let id = self
            .recency
            .insert(CacheEntry::new(key.clone(), value, now, self.ttl));
        self.recency.link_front(id);
        self.index.insert(key, id);

        while self.index.len() > self.capacity {
            let evicted = match self.recency.evict_lru() {
                Some(entry) => entry,
                None => break,
            };
            self.index.remove(&evicted.key);

            // Classified against a fresh reading, not `now`.
            if evicted.is_expired(self.clock.now()) {
                self.stats.record_expiration();
                trace!("Evicted expired entry (deadline {:?})", evicted.expires_at);
            } else {
                self.stats.record_removal();
                trace!("Evicted least recently used entry (deadline {:?})", evicted.expires_at);
            }
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.index.len(),
            capacity: self.capacity,
            ..self.stats
        }
    }

    /// Zeroes all counters without touching cached data.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        debug!("Cache statistics reset");
    }

    // == Accessors ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Consistency Probe ==
    /// Verifies that the key index and recency list describe the same set
    /// of entries and that the capacity bound holds.
    pub fn check_invariants(&self) -> Result<()> {
        if self.index.len() != self.recency.len() {
            return Err(CacheError::Inconsistent(format!(
                "index holds {} keys but recency list links {} entries",
                self.index.len(),
                self.recency.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(CacheError::Inconsistent(format!(
                "{} live entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        self.recency.validate().map_err(CacheError::Inconsistent)?;

        for (id, entry) in self.recency.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(CacheError::Inconsistent(format!(
                    "linked slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.recency.iter().map(|(_, entry)| entry.key.clone()).collect()
    }
}

impl<K, V, C> fmt::Debug for CacheStore<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
