//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, removals and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of live entries
    pub size: usize,
    /// Configured bound on live entries
    pub capacity: usize,
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries evicted for capacity before their TTL elapsed
    pub removals: u64,
    /// Entries dropped because their TTL had elapsed
    pub expirations: u64,
    /// Number of `get` calls
    pub get_ops: u64,
    /// Number of `set` calls
    pub set_ops: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Since ==
    /// Counter deltas accumulated after `baseline` was taken.
    ///
    /// `size` and `capacity` are taken from `self`. Counters that went
    /// backwards (a reset between the two snapshots) clamp to zero.
    pub fn since(&self, baseline: &CacheStats) -> CacheStats {
        CacheStats {
            size: self.size,
            capacity: self.capacity,
            hits: self.hits.saturating_sub(baseline.hits),
            misses: self.misses.saturating_sub(baseline.misses),
            removals: self.removals.saturating_sub(baseline.removals),
            expirations: self.expirations.saturating_sub(baseline.expirations),
            get_ops: self.get_ops.saturating_sub(baseline.get_ops),
            set_ops: self.set_ops.saturating_sub(baseline.set_ops),
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Removal ==
    /// Increments the counter of live entries evicted for capacity.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    // == Record Expiration ==
    /// Increments the counter of entries dropped after their TTL elapsed.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Record Get ==
    /// Increments the `get` call counter.
    pub fn record_get(&mut self) {
        self.get_ops += 1;
    }

    // == Record Set ==
    /// Increments the `set` call counter.
    pub fn record_set(&mut self) {
        self.set_ops += 1;
    }

    // == Reset ==
    /// Zeroes every counter, leaving `size` and `capacity` alone.
    pub fn reset(&mut self) {
        *self = CacheStats {
            size: self.size,
            capacity: self.capacity,
            ..CacheStats::default()
        };
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.removals, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_reset_keeps_size_and_capacity() {
        let mut stats = CacheStats {
            size: 3,
            capacity: 8,
            ..CacheStats::new()
        };
        stats.record_get();
        stats.record_hit();
        stats.record_set();
        stats.record_removal();
        stats.record_expiration();

        stats.reset();
        assert_eq!(
            stats,
            CacheStats {
                size: 3,
                capacity: 8,
                ..CacheStats::new()
            }
        );
    }

    #[test]
    fn test_since_reports_window() {
        let baseline = CacheStats {
            size: 10,
            capacity: 10,
            hits: 4,
            misses: 6,
            removals: 1,
            expirations: 2,
            get_ops: 10,
            set_ops: 10,
        };
        let later = CacheStats {
            size: 9,
            hits: 10,
            misses: 10,
            removals: 3,
            expirations: 2,
            get_ops: 20,
            set_ops: 15,
            ..baseline
        };

        let window = later.since(&baseline);
        assert_eq!(window.size, 9);
        assert_eq!(window.hits, 6);
        assert_eq!(window.misses, 4);
        assert_eq!(window.removals, 2);
        assert_eq!(window.expirations, 0);
        assert_eq!(window.get_ops, 10);
        assert_eq!(window.set_ops, 5);
        assert_eq!(window.hit_rate(), 0.6);
    }

    #[test]
    fn test_since_after_reset_clamps() {
        let baseline = CacheStats {
            hits: 5,
            ..CacheStats::new()
        };
        let after_reset = CacheStats::new();
        assert_eq!(after_reset.since(&baseline).hits, 0);
    }

    #[test]
    fn test_stats_serialize_shape() {
        let json = serde_json::to_value(CacheStats::new()).unwrap();
        for field in [
            "size",
            "capacity",
            "hits",
            "misses",
            "removals",
            "expirations",
            "get_ops",
            "set_ops",
        ] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
    }
}
