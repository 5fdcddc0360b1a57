//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::sync::Arc;

// == Cache Entry ==
/// A single cached value with its byte accounting.
///
/// Values are logically immutable once cached: `size_bytes` is measured once
/// at insertion time and never re-measured, and callers only ever receive a
/// shared `Arc` to the value.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value, shared with callers
    pub value: Arc<V>,
    /// Estimated footprint in bytes, fixed at insertion
    pub size_bytes: usize,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry.
    pub fn new(value: Arc<V>, size_bytes: usize) -> Self {
        Self { value, size_bytes }
    }
}
