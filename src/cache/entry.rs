//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

// == Cache Entry ==
/// A single cached key/value pair and its expiry deadline.
///
/// The recency links live in the arena node that owns the entry, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// Key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute deadline on the cache clock's time line
    pub expires_at: Duration,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    pub fn new(key: K, value: V, now: Duration, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: now.saturating_add(ttl),
        }
    }

    // == Refresh ==
    /// Overwrites value and deadline in place, keeping the entry's identity.
    pub fn refresh(&mut self, value: V, now: Duration, ttl: Duration) {
        self.value = value;
        self.expires_at = now.saturating_add(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// read exactly one TTL after the write already misses.
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(100);

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("a", 1, Duration::from_secs(5), TTL);

        assert_eq!(entry.key, "a");
        assert_eq!(entry.value, 1);
        assert_eq!(entry.expires_at, Duration::from_secs(105));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("a", 1, Duration::ZERO, TTL);

        assert!(!entry.is_expired(TTL - Duration::from_nanos(1)));
        assert!(entry.is_expired(TTL), "Entry should be expired at boundary");
        assert!(entry.is_expired(TTL + Duration::from_secs(1)));
    }

    #[test]
    fn test_refresh_resets_deadline() {
        let mut entry = CacheEntry::new("a", 1, Duration::ZERO, TTL);
        entry.refresh(2, Duration::from_secs(150), TTL);

        assert_eq!(entry.value, 2);
        assert_eq!(entry.expires_at, Duration::from_secs(250));
        assert!(!entry.is_expired(Duration::from_secs(200)));
    }

    #[test]
    fn test_deadline_saturates() {
        let entry = CacheEntry::new("a", 1, Duration::MAX, TTL);
        assert_eq!(entry.expires_at, Duration::MAX);
    }
}
