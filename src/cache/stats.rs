//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions, and
//! byte accounting.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that required running the computation
    pub misses: u64,
    /// Number of entries evicted to satisfy the byte budget
    pub evictions: u64,
    /// Number of insertions that used the fallback size estimate
    pub estimation_fallbacks: u64,
    /// Number of times a single resident entry exceeded the budget on its own
    pub capacity_overflows: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current sum of estimated entry sizes
    pub total_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
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

    // == Recorders ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Increments the estimation fallback counter.
    pub fn record_estimation_fallback(&mut self) {
        self.estimation_fallbacks += 1;
    }

    /// Increments the capacity overflow counter.
    pub fn record_capacity_overflow(&mut self) {
        self.capacity_overflows += 1;
    }

    // == Update Totals ==
    /// Updates the entry count and byte total.
    pub fn set_totals(&mut self, entries: usize, bytes: usize) {
        self.total_entries = entries;
        self.total_bytes = bytes;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.estimation_fallbacks, 0);
        assert_eq!(stats.capacity_overflows, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_counters() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_estimation_fallback();
        stats.record_capacity_overflow();
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.estimation_fallbacks, 1);
        assert_eq!(stats.capacity_overflows, 1);
    }

    #[test]
    fn test_set_totals() {
        let mut stats = CacheStats::new();
        stats.set_totals(3, 1200);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_bytes, 1200);
    }
}
