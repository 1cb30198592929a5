//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Cache misses and expiry
//! are normal outcomes and never surface here.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must allow at least one live entry
    #[error("Invalid capacity: cache capacity must be at least 1")]
    ZeroCapacity,

    /// TTL must be a positive duration
    #[error("Invalid ttl: cache ttl must be greater than zero")]
    ZeroTtl,

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key index and recency list disagree
    #[error("Inconsistent cache state: {0}")]
    Inconsistent(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::ZeroCapacity.to_string(),
            "Invalid capacity: cache capacity must be at least 1"
        );
        assert_eq!(
            CacheError::InvalidConfig("CACHE_TTL_MS=abc".to_string()).to_string(),
            "Invalid configuration: CACHE_TTL_MS=abc"
        );
        assert!(CacheError::Inconsistent("len".to_string())
            .to_string()
            .contains("len"));
    }
}
