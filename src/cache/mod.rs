//! Cache Module
//!
//! Provides a fixed-capacity LRU cache with lazy, cache-wide TTL expiration.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;
mod timed;


// Re-export public types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use stats::CacheStats;
pub use store::CacheOutcome;
pub use timed::TimedLruCache;

// Engine internals, reachable only through `TimedLruCache`
pub(crate) use entry::CacheEntry;
pub(crate) use lru::{RecencyList, SlotId};
pub(crate) use store::CacheStore;
