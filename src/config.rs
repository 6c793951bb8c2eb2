//! Configuration for the eviction cache.
//!
//! The only tunable is the entry capacity. A capacity of zero is accepted and
//! produces a cache that never stores anything; a negative capacity (which can
//! only arrive through the signed constructor) is rejected.
//!
//! # Examples
//!
//! ```
//! use eviction_cache::config::EvictionCacheConfig;
//! use eviction_cache::EvictionCache;
//!
//! let config = EvictionCacheConfig::new(100);
//! let cache: EvictionCache<String, i32> = EvictionCache::init(config, None);
//! assert_eq!(cache.cap(), 100);
//!
//! // Signed input is validated instead of clamped
//! assert!(EvictionCacheConfig::try_new(-5).is_err());
//! ```

use crate::error::ConfigError;
use core::fmt;

/// Configuration for an [`EvictionCache`](crate::EvictionCache).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EvictionCacheConfig {
    capacity: usize,
}

impl EvictionCacheConfig {
    /// Creates a configuration holding at most `capacity` entries.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration from a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCapacity`] when `capacity < 0`.
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        if capacity < 0 {
            return Err(ConfigError::NegativeCapacity(capacity));
        }
        // Saturate on targets where usize is narrower than i64.
        Ok(Self::new(usize::try_from(capacity).unwrap_or(usize::MAX)))
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl TryFrom<i64> for EvictionCacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        Self::try_new(capacity)
    }
}

impl From<usize> for EvictionCacheConfig {
    fn from(capacity: usize) -> Self {
        Self::new(capacity)
    }
}

impl fmt::Debug for EvictionCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
