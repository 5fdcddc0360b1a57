//! Size Estimation Module
//!
//! The cache bounds approximate memory, not exact RSS: each cached value
//! reports its own estimated heap footprint once, at insertion time.

// == Fallback ==
/// Size charged to an entry whose footprint could not be measured.
///
/// Large enough that a handful of unmeasurable values still drives eviction,
/// finite so that bookkeeping never breaks.
pub const ESTIMATE_FALLBACK_BYTES: usize = 64 * 1024 * 1024;

// == Estimate Size Trait ==
/// Approximate memory footprint of a cacheable value.
///
/// Implementations must be deterministic for a given value's structure and
/// cheap relative to the cost of producing the value: the estimate runs once
/// per cache miss, never per hit. Being within a small constant factor of the
/// true footprint is fine; the dominant cost for tabular data is the bulk
/// column payload, so estimates should sum per-column buffer sizes rather
/// than charge a fixed per-object overhead.
pub trait EstimateSize {
    /// Returns the estimated footprint in bytes, or `None` when the value's
    /// shape cannot be measured. The cache substitutes
    /// [`ESTIMATE_FALLBACK_BYTES`] for `None` and caches the entry normally.
    fn estimate_bytes(&self) -> Option<usize>;
}

impl EstimateSize for String {
    fn estimate_bytes(&self) -> Option<usize> {
        Some(std::mem::size_of::<Self>() + self.capacity())
    }
}

impl<T> EstimateSize for Vec<T> {
    fn estimate_bytes(&self) -> Option<usize> {
        Some(std::mem::size_of::<Self>() + self.capacity() * std::mem::size_of::<T>())
    }
}
