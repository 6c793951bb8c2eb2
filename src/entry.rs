//! Cache Entry and Rank Types
//!
//! Every live key owns one cache entry holding its value and the two
//! counters that decide its eviction priority. The pair of counters is
//! captured as a [`Rank`], the ordering key of the ranking tree.
//!
//! # Rank Ordering
//!
//! Ranks compare lexicographically:
//!
//! 1. `frequency` ascending (least frequently used first)
//! 2. `order` ascending (least recently used first among equal frequency)
//!
//! Orders come from a per-cache logical clock that hands out each value
//! exactly once, so no two live entries ever share a rank.
//!
//! ```
//! use eviction_cache::entry::Rank;
//!
//! let cold = Rank::new(1, 7);
//! let older_cold = Rank::new(1, 3);
//! let warm = Rank::new(2, 1);
//!
//! assert!(older_cold < cold);
//! assert!(cold < warm);
//! ```
//!
//! # Memory Layout
//!
//! - `value: V` - user's value type
//! - `frequency: u64` - 8 bytes
//! - `order: u64` - 8 bytes
//!
//! The key is stored once in the index and once in the ranking tree.

use core::fmt;

/// Eviction priority of an entry. The smallest rank is evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank {
    /// Number of accesses (insert counts as the first).
    pub frequency: u64,
    /// Logical timestamp of the most recent access.
    pub order: u64,
}

impl Rank {
    /// Creates a rank from its two components.
    #[inline]
    pub const fn new(frequency: u64, order: u64) -> Self {
        Self { frequency, order }
    }
}

/// A cached value plus its ranking metadata.
pub(crate) struct CacheEntry<V> {
    value: V,
    frequency: u64,
    order: u64,
}

impl<V> CacheEntry<V> {
    /// Creates a freshly inserted entry: frequency 1, accessed at `order`.
    #[inline]
    pub(crate) fn new(value: V, order: u64) -> Self {
        Self {
            value,
            frequency: 1,
            order,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Swaps in a new value and returns the old one.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Returns the access count.
    #[inline]
    pub(crate) fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Returns the logical timestamp of the last access.
    #[cfg(test)]
    #[inline]
    pub(crate) fn order(&self) -> u64 {
        self.order
    }

    /// Returns the current eviction priority.
    #[inline]
    pub(crate) fn rank(&self) -> Rank {
        Rank::new(self.frequency, self.order)
    }

    /// Records one access at `order` and returns the `(old, new)` ranks.
    ///
    /// The frequency saturates instead of wrapping so it never decreases.
    #[inline]
    pub(crate) fn touch(&mut self, order: u64) -> (Rank, Rank) {
        debug_assert!(order > self.order, "access order must strictly increase");
        let old = self.rank();
        self.frequency = self.frequency.saturating_add(1);
        self.order = order;
        (old, self.rank())
    }

    #[inline]
    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("value", &self.value)
            .field("frequency", &self.frequency)
            .field("order", &self.order)
            .finish()
    }
}
