//! Ordered ranking of live keys.
//!
//! [`Ranking`] maps each live key's [`Rank`] back to the key in a
//! `BTreeMap`. Because ranks are unique, the tree holds exactly one node per
//! live key and its first node is always the eviction victim.
//!
//! ```text
//!   rank (freq, order)      key
//!   ─────────────────────────────
//!   (1, 4)             ──▶  "b"    ◀── first(): victim
//!   (1, 9)             ──▶  "d"
//!   (3, 8)             ──▶  "a"
//!   (5, 10)            ──▶  "c"
//! ```
//!
//! An access moves a key with [`Ranking::reposition`]: its old node is
//! removed and a new one inserted, each O(log n). Nothing is ever rebuilt and
//! no stale nodes are left behind, so the tree and the cache index hold the
//! same key set after every call.

extern crate alloc;

use crate::entry::Rank;
use alloc::collections::btree_map::{self, BTreeMap};

/// Keys ordered by ascending [`Rank`].
pub(crate) struct Ranking<K> {
    tree: BTreeMap<Rank, K>,
}

impl<K> Ranking<K> {
    pub(crate) fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.tree.len()
    }

    /// Adds `key` at `rank`. Ranks are unique, so the slot must be free.
    pub(crate) fn insert(&mut self, rank: Rank, key: K) {
        let displaced = self.tree.insert(rank, key);
        debug_assert!(displaced.is_none(), "duplicate rank {:?}", rank);
    }

    /// Removes the key stored at `rank`.
    pub(crate) fn remove(&mut self, rank: &Rank) -> Option<K> {
        self.tree.remove(rank)
    }

    /// Moves the key at `old` to `new`.
    ///
    /// Returns `false` and leaves the tree untouched if nothing sits at `old`.
    pub(crate) fn reposition(&mut self, old: &Rank, new: Rank) -> bool {
        match self.tree.remove(old) {
            Some(key) => {
                self.insert(new, key);
                true
            }
            None => false,
        }
    }

    /// Returns the minimum rank and its key.
    #[inline]
    pub(crate) fn first(&self) -> Option<(&Rank, &K)> {
        self.tree.first_key_value()
    }

    /// Removes and returns the minimum rank and its key.
    #[inline]
    pub(crate) fn pop_first(&mut self) -> Option<(Rank, K)> {
        self.tree.pop_first()
    }

    pub(crate) fn clear(&mut self) {
        self.tree.clear();
    }

    /// Iterates from the next victim to the most protected key.
    pub(crate) fn iter(&self) -> btree_map::Iter<'_, Rank, K> {
        self.tree.iter()
    }
}

impl<K> Default for Ranking<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for Ranking<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ranking")
            .field("len", &self.tree.len())
            .field("min", &self.tree.keys().next())
            .finish()
    }
}
