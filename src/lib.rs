//! # eviction-cache
//!
//! A fixed-capacity, in-memory key-value cache that evicts the **least
//! frequently used** entry when full, and among equally frequent entries the
//! **least recently used** one.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         EvictionCache                            │
//! │                                                                  │
//! │   get / get_mut / put(existing)                                  │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   frequency += 1, order = ++tick ──▶ move node in ranking tree   │
//! │                                                                  │
//! │   put(new key) on a full cache                                   │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   pop min (frequency, order) ──▶ remove from index ──▶ insert    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use eviction_cache::EvictionCache;
//!
//! let mut cache = EvictionCache::new(2);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 {
//!     cache.get(&"popular");
//! }
//!
//! cache.put("new", 3); // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"rare").is_none());
//! assert!(cache.get(&"popular").is_some());
//! ```
//!
//! ## Tie-Break
//!
//! Recency is measured with a per-cache logical clock rather than wall time,
//! so two back-to-back accesses never share a timestamp and the victim is
//! always unique.
//!
//! ```rust
//! use eviction_cache::EvictionCache;
//!
//! let mut cache = EvictionCache::new(2);
//! cache.put(1, 1);
//! cache.put(2, 2);
//! // Both have frequency 1; key 1 was touched first
//! assert_eq!(cache.put(3, 3), Some((1, 1)));
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `put` / `remove` / `pop` | O(log n) |
//! | `contains` / `len` / `peek` | O(1) expected |
//!
//! ## Concurrent Access
//!
//! Enable the `concurrent` feature for [`ConcurrentEvictionCache`], which
//! serializes every operation behind one `parking_lot::Mutex`:
//!
//! ```toml
//! [dependencies]
//! eviction-cache = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the LFU cache with LRU tie-break
//! - [`entry`]: per-entry metadata and the rank ordering key
//! - [`config`]: cache configuration
//! - [`error`]: configuration errors
//! - [`metrics`]: usage counters
//! - [`concurrent`]: thread-safe wrapper (requires `concurrent` feature)

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// LFU cache with least-recently-used tie-break.
///
/// Provides [`EvictionCache`], which keeps a hash index of entries and an
/// ordered tree of their ranks in lockstep.
pub mod cache;

/// Cache entry and rank types.
pub mod entry;

/// Ordered tree of live keys by rank.
///
/// Internal: callers observe it only through [`EvictionCache::iter`] and
/// [`EvictionCache::peek_victim`].
pub(crate) mod ranking;

/// Cache configuration.
pub mod config;

/// Configuration errors.
pub mod error;

/// Cache metrics system.
///
/// Counters for hits, misses, insertions and evictions, reported as a
/// deterministic `BTreeMap`.
pub mod metrics;

/// Thread-safe cache wrapper.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use cache::EvictionCache;
pub use config::EvictionCacheConfig;
pub use entry::Rank;
pub use error::ConfigError;
pub use metrics::{CacheMetrics, EvictionCacheMetrics};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentEvictionCache;
