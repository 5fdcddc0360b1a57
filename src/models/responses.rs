//! Response DTOs for the log service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::series::Trace;

/// One dropdown option in the file picker (GET /files)
#[derive(Debug, Clone, Serialize)]
pub struct FileOption {
    /// Display label (the file name)
    pub label: String,
    /// Value submitted back in requests
    pub value: String,
}

/// Response body for the file listing (GET /files)
#[derive(Debug, Clone, Serialize)]
pub struct FilesResponse {
    pub files: Vec<FileOption>,
}

impl FilesResponse {
    /// Creates a response from plain file names.
    pub fn new(names: Vec<String>) -> Self {
        Self {
            files: names
                .into_iter()
                .map(|name| FileOption {
                    label: name.clone(),
                    value: name,
                })
                .collect(),
        }
    }
}

/// Response body for the field listing (GET /files/:name/fields)
#[derive(Debug, Clone, Serialize)]
pub struct FieldsResponse {
    /// The file the fields belong to
    pub file: String,
    /// All plottable fields in file order
    pub fields: Vec<String>,
    /// Subset of `fields` pre-selected by the dashboard
    pub defaults: Vec<String>,
}

/// Response body for the series operation (POST /series)
#[derive(Debug, Clone, Serialize)]
pub struct SeriesResponse {
    pub file: String,
    pub traces: Vec<Trace>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of loads answered from the cache
    pub hits: u64,
    /// Number of loads that parsed the file
    pub misses: u64,
    /// Number of frames evicted to satisfy the byte budget
    pub evictions: u64,
    /// Number of insertions charged the fallback size estimate
    pub estimation_fallbacks: u64,
    /// Number of times a lone cached frame exceeded the budget
    pub capacity_overflows: u64,
    /// Current number of cached frames
    pub total_entries: usize,
    /// Current estimated cache footprint
    pub total_bytes: usize,
    /// Configured byte budget
    pub capacity_bytes: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a response from cache statistics and the configured budget.
    pub fn new(stats: &CacheStats, capacity_bytes: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            estimation_fallbacks: stats.estimation_fallbacks,
            capacity_overflows: stats.capacity_overflows,
            total_entries: stats.total_entries,
            total_bytes: stats.total_bytes,
            capacity_bytes,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
