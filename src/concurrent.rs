//! Thread-Safe Eviction Cache
//!
//! [`ConcurrentEvictionCache`] wraps a single [`EvictionCache`] in a
//! `parking_lot::Mutex`. Every method takes the lock once and runs one cache
//! operation to completion, so a lookup can never observe an entry that a
//! concurrent `put` is halfway through evicting.
//!
//! ## Why One Lock Instead of Segments?
//!
//! A lock-striped cache keeps an independent ranking per segment and evicts
//! the minimum of *one* segment, which is generally not the global
//! least-frequently-used entry. This cache promises the global victim, so all
//! keys share one ranking and one lock.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! A `get` bumps frequency and recency, so it is a write. A read lock would
//! never be usable.
//!
//! # Example
//!
//! ```rust
//! use eviction_cache::ConcurrentEvictionCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentEvictionCache::new(1_000));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key-{}-{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 let _ = cache.get(&key);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 400);
//! ```

extern crate alloc;

use crate::cache::EvictionCache;
use crate::config::EvictionCacheConfig;
use crate::error::ConfigError;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LFU cache with LRU tie-break, guarded by a single lock.
pub struct ConcurrentEvictionCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<EvictionCache<K, V, S>>,
}

impl<K: Hash + Eq + Clone, V> ConcurrentEvictionCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(EvictionCache::new(capacity))
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCapacity`] when `capacity < 0`.
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        EvictionCache::try_new(capacity).map(Self::from_cache)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ConcurrentEvictionCache<K, V, S> {
    /// Creates a cache from a configuration and an optional hash builder.
    pub fn init(config: EvictionCacheConfig, hash_builder: Option<S>) -> Self
    where
        S: Default,
    {
        Self::from_cache(EvictionCache::init(config, hash_builder))
    }

    /// Takes ownership of an existing cache.
    pub fn from_cache(cache: EvictionCache<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Returns the inner cache, consuming the wrapper.
    pub fn into_inner(self) -> EvictionCache<K, V, S> {
        self.inner.into_inner()
    }

    /// Returns the maximum number of entries.
    pub fn cap(&self) -> usize {
        self.inner.lock().cap()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a clone of the value of `key`, counting it as an access.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value of `key` while holding the lock.
    ///
    /// Counts as an access. Avoids cloning when only part of the value is
    /// needed.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Inserts or updates a key-value pair; see [`EvictionCache::put`].
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    /// Returns `true` if the cache contains `key`. Not an access.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Returns the access count of `key`.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().frequency(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the current eviction victim.
    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access to the whole cache.
    ///
    /// Use this to make a sequence of operations atomic, e.g. a lookup
    /// followed by a conditional insert.
    pub fn with_cache<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EvictionCache<K, V, S>) -> R,
    {
        f(&mut self.inner.lock())
    }
}

impl<K, V, S> CacheMetrics for ConcurrentEvictionCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        CacheMetrics::metrics(&*self.inner.lock())
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLFU-LRU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentEvictionCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentEvictionCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentEvictionCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}
