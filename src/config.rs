//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default number of live entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default cache-wide TTL in milliseconds
pub const DEFAULT_TTL_MS: u64 = 5_000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of live entries the cache can hold
    pub capacity: usize,
    /// Time-to-live applied to every entry on write
    pub ttl: Duration,
}

impl CacheConfig {
    /// Creates a config with explicit values.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { capacity, ttl }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum live entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 5000)
    ///
    /// Unset variables fall back to their defaults. A variable that is set
    /// but does not parse is reported as [`CacheError::InvalidConfig`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = parse_var(&lookup, "CACHE_CAPACITY")?.unwrap_or(DEFAULT_CAPACITY);
        let ttl_ms = parse_var(&lookup, "CACHE_TTL_MS")?.unwrap_or(DEFAULT_TTL_MS);

        let config = Self {
            capacity,
            ttl: Duration::from_millis(ttl_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the cache cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        if self.ttl.is_zero() {
            return Err(CacheError::ZeroTtl);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{}={:?}", name, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_lookup_overrides() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("CACHE_CAPACITY", "64"),
            ("CACHE_TTL_MS", " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.ttl, Duration::from_millis(250));
    }

    #[test]
    fn test_config_lookup_unparsable() {
        let result = CacheConfig::from_lookup(lookup_from(&[("CACHE_CAPACITY", "lots")]));
        assert!(
            matches!(result, Err(CacheError::InvalidConfig(msg)) if msg.contains("CACHE_CAPACITY"))
        );
    }

    #[test]
    fn test_config_rejects_zero_values() {
        let zero_capacity = CacheConfig::from_lookup(lookup_from(&[("CACHE_CAPACITY", "0")]));
        assert_eq!(zero_capacity, Err(CacheError::ZeroCapacity));

        let zero_ttl = CacheConfig::new(10, Duration::ZERO);
        assert_eq!(zero_ttl.validate(), Err(CacheError::ZeroTtl));
    }
}
