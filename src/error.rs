//! Error types for cache construction.
//!
//! Cache operations themselves never fail: a lookup miss is `None`, and
//! `put` always succeeds. The only rejected input is a capacity that cannot
//! describe a cache at all.

use thiserror::Error;

/// Error returned when a cache configuration is invalid.
///
/// # Examples
///
/// ```
/// use eviction_cache::config::EvictionCacheConfig;
/// use eviction_cache::error::ConfigError;
///
/// let err = EvictionCacheConfig::try_new(-1).unwrap_err();
/// assert_eq!(err, ConfigError::NegativeCapacity(-1));
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested capacity was below zero.
    #[error("cache capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),
}
