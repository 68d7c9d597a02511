//! Cache Statistics Module
//!
//! Tracks cache and render pipeline metrics.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache and render pipeline metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests served straight from the cache
    pub hits: u64,
    /// Requests that found no cached preview
    pub misses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Configured cache capacity
    pub capacity: usize,
    /// Renders dispatched to the worker pool
    pub renders_started: u64,
    /// Requests that attached to an already running render
    pub coalesced: u64,
    /// Renders that ended in a decode or render failure
    pub failures: u64,
    /// Renders abandoned after every waiter withdrew
    pub cancelled_renders: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_render_started(&mut self) {
        self.renders_started += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_cancelled_render(&mut self) {
        self.cancelled_renders += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
