//! Timed LRU - a thread-safe, fixed-capacity LRU cache with TTL expiry
//!
//! Entries are evicted in strict recency order once capacity is exceeded and
//! expire lazily, one cache-wide TTL after their last write.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheOutcome, CacheStats, Clock, ManualClock, MonotonicClock, TimedLruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
