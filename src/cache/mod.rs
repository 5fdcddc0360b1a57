//! Cache Module
//!
//! Provides memory-bounded memoization with LRU eviction: an expensive,
//! deterministic computation is run at most once per key, its result is
//! cached, and least-recently-used results are dropped once the total
//! estimated byte footprint exceeds a fixed budget.

mod entry;
mod lru;
mod size;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use size::{EstimateSize, ESTIMATE_FALLBACK_BYTES};
pub use stats::CacheStats;
pub use store::MemoCache;
