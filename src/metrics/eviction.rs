//! Eviction Cache Metrics
//!
//! Frequency-related counters on top of [`CoreCacheMetrics`].

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics for the LFU cache with LRU tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictionCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Total number of frequency increments (hits plus updating puts)
    pub total_frequency_increments: u64,

    /// Highest frequency any entry has reached
    pub max_frequency: u64,

    /// Frequency of the most recent victim, 0 before the first eviction
    pub last_victim_frequency: u64,

    /// Sum of victim frequencies, for the average
    pub victim_frequency_sum: u64,
}

impl EvictionCacheMetrics {
    /// Creates zeroed metrics for a cache of `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            total_frequency_increments: 0,
            max_frequency: 0,
            last_victim_frequency: 0,
            victim_frequency_sum: 0,
        }
    }

    /// Records an entry's frequency going up to `new_frequency`.
    pub fn record_frequency_increment(&mut self, new_frequency: u64) {
        self.total_frequency_increments += 1;
        self.max_frequency = self.max_frequency.max(new_frequency);
    }

    /// Records a new key stored with frequency 1.
    pub fn record_insertion(&mut self) {
        self.core.record_insertion();
        self.max_frequency = self.max_frequency.max(1);
    }

    /// Records a victim of the given frequency leaving the cache.
    pub fn record_eviction(&mut self, victim_frequency: u64) {
        self.core.record_eviction();
        self.last_victim_frequency = victim_frequency;
        self.victim_frequency_sum = self.victim_frequency_sum.saturating_add(victim_frequency);
    }

    /// Average frequency of evicted entries, or 0.0 before the first eviction.
    pub fn average_victim_frequency(&self) -> f64 {
        if self.core.evictions > 0 {
            self.victim_frequency_sum as f64 / self.core.evictions as f64
        } else {
            0.0
        }
    }

    /// Converts all metrics to a map with deterministic key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "last_victim_frequency".to_string(),
            self.last_victim_frequency as f64,
        );
        metrics.insert(
            "average_victim_frequency".to_string(),
            self.average_victim_frequency(),
        );

        metrics
    }
}

impl CacheMetrics for EvictionCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU-LRU"
    }
}
