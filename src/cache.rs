//! LFU Cache with LRU Tie-Break.
//!
//! [`EvictionCache`] holds at most `capacity` entries. When a new key arrives
//! at a full cache, the entry with the smallest access count is evicted; among
//! entries with equal counts, the one touched longest ago goes first.
//!
//! # How It Works
//!
//! ```text
//!   index: HashMap<K, CacheEntry<V>>          ranking: BTreeMap<Rank, K>
//!   ┌──────┬──────────────────────────┐       ┌──────────┬──────┐
//!   │ "a"  │ value, freq=3, order=8   │ ◀───▶ │ (1, 4)   │ "b"  │ ◀── victim
//!   │ "b"  │ value, freq=1, order=4   │       │ (1, 9)   │ "d"  │
//!   │ "c"  │ value, freq=5, order=10  │       │ (3, 8)   │ "a"  │
//!   │ "d"  │ value, freq=1, order=9   │       │ (5, 10)  │ "c"  │
//!   └──────┴──────────────────────────┘       └──────────┴──────┘
//! ```
//!
//! - Every access (`get`, `get_mut`, updating `put`) bumps the entry's
//!   frequency, stamps it with the next value of a per-cache logical clock,
//!   and moves its ranking node in the same call. Both structures always hold
//!   the same keys.
//! - `put` of a new key into a full cache pops the first ranking node and
//!   removes it from the index *before* inserting, so `len()` never exceeds
//!   `cap()`.
//! - A cache with capacity 0 ignores every `put`.
//!
//! # Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `get_mut` / `put` / `remove` / `pop` | O(log n) |
//! | `contains` / `peek` / `frequency` / `len` | O(1) expected |
//! | `peek_victim` | O(log n) |
//!
//! # Thread Safety
//!
//! `EvictionCache` is a plain single-threaded structure; a lookup mutates it.
//! Share it behind a lock, or use `ConcurrentEvictionCache` with the
//! `concurrent` feature.

extern crate alloc;

use crate::config::EvictionCacheConfig;
use crate::entry::{CacheEntry, Rank};
use crate::error::ConfigError;
use crate::metrics::{CacheMetrics, EvictionCacheMetrics};
use crate::ranking::Ranking;
use alloc::collections::btree_map;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// A fixed-capacity LFU cache that breaks frequency ties by recency.
///
/// # Examples
///
/// ```
/// use eviction_cache::EvictionCache;
///
/// let mut cache = EvictionCache::new(2);
/// cache.put(1, 100);
/// cache.put(2, 200);
///
/// // Reading key 1 raises its frequency to 2
/// assert_eq!(cache.get(&1), Some(&100));
///
/// // Key 2 has the lower frequency and is evicted
/// assert_eq!(cache.put(3, 300), Some((2, 200)));
/// assert_eq!(cache.get(&2), None);
/// assert!(cache.contains(&1) && cache.contains(&3));
/// ```
pub struct EvictionCache<K, V, S = DefaultHashBuilder> {
    config: EvictionCacheConfig,

    /// Owns the entries
    index: HashMap<K, CacheEntry<V>, S>,

    /// Same keys as `index`, ordered by eviction priority
    ranking: Ranking<K>,

    /// Last handed-out access order
    tick: u64,

    metrics: EvictionCacheMetrics,
}

impl<K: Hash + Eq + Clone, V> EvictionCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is allowed; such a cache stores nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::EvictionCache;
    ///
    /// let mut cache: EvictionCache<&str, u32> = EvictionCache::new(0);
    /// cache.put("a", 1);
    /// assert_eq!(cache.get(&"a"), None);
    /// assert_eq!(cache.len(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCapacity`] when `capacity < 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::EvictionCache;
    ///
    /// assert!(EvictionCache::<u32, u32>::try_new(-1).is_err());
    /// assert_eq!(EvictionCache::<u32, u32>::try_new(8).unwrap().cap(), 8);
    /// ```
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        let config = EvictionCacheConfig::try_new(capacity)?;
        Ok(Self::init(config, None))
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> EvictionCache<K, V, S> {
    /// Creates a cache from a configuration and an optional hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::config::EvictionCacheConfig;
    /// use eviction_cache::EvictionCache;
    ///
    /// let cache: EvictionCache<String, Vec<u8>> =
    ///     EvictionCache::init(EvictionCacheConfig::new(64), None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: EvictionCacheConfig, hash_builder: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_config_and_hasher(config, hash_builder.unwrap_or_default())
    }

    /// Creates a cache with the specified capacity and hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::EvictionCache;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let cache: EvictionCache<&str, u32, _> = EvictionCache::with_hasher(10, RandomState::new());
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_config_and_hasher(EvictionCacheConfig::new(capacity), hash_builder)
    }

    fn with_config_and_hasher(config: EvictionCacheConfig, hash_builder: S) -> Self {
        let capacity = config.capacity();
        debug!(capacity, "creating eviction cache");
        EvictionCache {
            config,
            index: HashMap::with_capacity_and_hasher(
                capacity.min(MAX_PREALLOCATED_ENTRIES),
                hash_builder,
            ),
            ranking: Ranking::new(),
            tick: 0,
            metrics: EvictionCacheMetrics::new(capacity as u64),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the counters collected so far.
    ///
    /// [`CacheMetrics::metrics`] reports the same counters as a map.
    #[inline]
    pub fn stats(&self) -> &EvictionCacheMetrics {
        &self.metrics
    }

    #[inline]
    fn next_order(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Records an access to `key` and re-ranks it.
    fn touch<Q>(&mut self, key: &Q) -> Option<&mut CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = match self.index.get_mut(key) {
            Some(entry) => entry,
            None => {
                self.metrics.core.record_miss();
                return None;
            }
        };

        self.tick += 1;
        let (old, new) = entry.touch(self.tick);
        let moved = self.ranking.reposition(&old, new);
        debug_assert!(moved, "ranking lost an entry at {:?}", old);
        trace!(
            frequency = new.frequency,
            order = new.order,
            "re-ranked entry"
        );

        self.metrics.core.record_hit();
        self.metrics.record_frequency_increment(new.frequency);
        Some(entry)
    }

    /// Returns a reference to the value of `key`, counting it as an access.
    ///
    /// A hit raises the entry's frequency and makes it the most recently
    /// used, which lowers its eviction priority. A miss returns `None` and
    /// changes nothing but the miss counter.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.touch(key).map(|entry| entry.value())
    }

    /// Returns a mutable reference to the value of `key`, counting it as an
    /// access exactly like [`get`](Self::get).
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.touch(key).map(CacheEntry::value_mut)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// - If `key` is present, its value is replaced, it counts as an access,
    ///   and the previous `(key, value)` is returned.
    /// - If `key` is new and the cache is full, the victim (lowest frequency,
    ///   then oldest access) is removed first and returned.
    /// - Otherwise the entry is stored with frequency 1 and `None` is
    ///   returned.
    ///
    /// On a zero-capacity cache this does nothing and returns `None`.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.config.capacity() == 0 {
            self.metrics.core.record_rejected_put();
            trace!("dropping put on zero-capacity cache");
            return None;
        }

        let order = self.next_order();

        if let Some(entry) = self.index.get_mut(&key) {
            let old_value = entry.replace_value(value);
            let (old, new) = entry.touch(order);
            let moved = self.ranking.reposition(&old, new);
            debug_assert!(moved, "ranking lost an entry at {:?}", old);
            trace!(
                frequency = new.frequency,
                order = new.order,
                "re-ranked entry"
            );

            self.metrics.core.record_update();
            self.metrics.record_frequency_increment(new.frequency);
            return Some((key, old_value));
        }

        let evicted = if self.index.len() >= self.config.capacity() {
            self.evict_one()
        } else {
            None
        };

        self.ranking.insert(Rank::new(1, order), key.clone());
        self.index.insert(key, CacheEntry::new(value, order));
        self.metrics.record_insertion();
        debug_assert!(self.index.len() <= self.config.capacity());

        evicted
    }

    /// Removes the minimum-rank entry from both structures.
    fn evict_one(&mut self) -> Option<(K, V)> {
        let (rank, key) = self.ranking.pop_first()?;
        let entry = self.index.remove(&key);
        debug_assert!(entry.is_some(), "ranked key missing from index");
        let entry = entry?;

        debug!(
            frequency = rank.frequency,
            order = rank.order,
            len = self.index.len(),
            "evicted least frequently used entry"
        );
        self.metrics.record_eviction(rank.frequency);
        Some((key, entry.into_value()))
    }

    /// Removes and returns the current eviction victim.
    ///
    /// This is the entry a full cache would drop on the next insertion of a
    /// new key: lowest frequency, and among those the least recently used.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::EvictionCache;
    ///
    /// let mut cache = EvictionCache::new(4);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// assert_eq!(cache.pop(), Some(("a", 1)));
    /// assert_eq!(cache.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.evict_one()
    }

    /// Returns the entry that would be evicted next, without touching it.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        let (_, key) = self.ranking.first()?;
        let entry = self.index.get(key)?;
        Some((key, entry.value()))
    }

    /// Returns `true` if the cache contains `key`. Not an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Returns the value of `key` without counting an access.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).map(CacheEntry::value)
    }

    /// Returns the access count of `key`, or `None` if it is absent.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).map(CacheEntry::frequency)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.index.remove(key)?;
        let ranked = self.ranking.remove(&entry.rank());
        debug_assert!(ranked.is_some(), "removed key was not ranked");

        self.metrics.core.record_removal();
        Some(entry.into_value())
    }

    /// Removes every entry. Access orders keep increasing afterwards.
    pub fn clear(&mut self) {
        self.index.clear();
        self.ranking.clear();
    }

    /// Iterates over entries from the next victim to the most protected one.
    /// Not an access.
    ///
    /// # Examples
    ///
    /// ```
    /// use eviction_cache::EvictionCache;
    ///
    /// let mut cache = EvictionCache::new(3);
    /// cache.put("x", 1);
    /// cache.put("y", 2);
    /// cache.put("z", 3);
    /// cache.get(&"x");
    ///
    /// let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, ["y", "z", "x"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            ranks: self.ranking.iter(),
            index: &self.index,
        }
    }

    /// Checks that the index and the ranking describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.ranking.len());
        assert!(self.index.len() <= self.config.capacity());
        for (rank, key) in self.ranking.iter() {
            let entry = self.index.get(key).expect("ranked key missing from index");
            assert_eq!(entry.rank(), *rank);
            assert!(entry.frequency() >= 1);
            assert!(entry.order() <= self.tick);
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for EvictionCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.metrics();
        metrics.insert(String::from("len"), self.index.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for EvictionCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionCache")
            .field("capacity", &self.config.capacity())
            .field("len", &self.index.len())
            .field("tick", &self.tick)
            .finish()
    }
}

impl<'a, K: Hash + Eq + Clone, V, S: BuildHasher> IntoIterator for &'a EvictionCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries in eviction order, created by
/// [`EvictionCache::iter`].
pub struct Iter<'a, K, V, S> {
    ranks: btree_map::Iter<'a, Rank, K>,
    index: &'a HashMap<K, CacheEntry<V>, S>,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        self.ranks
            .by_ref()
            .find_map(|(_, key)| index.get(key).map(|entry| (key, entry.value())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ranks.len();
        (remaining, Some(remaining))
    }
}

// The ranking holds exactly the keys of the index.
impl<K: Hash + Eq, V, S: BuildHasher> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.ranks.len())
            .finish()
    }
}
