//! Cache Stats Reporter Task
//!
//! Background task that periodically logs load cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::FrameCache;

/// Spawns a background task that periodically reports cache statistics.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reports. Besides the routine report it flags the capacity
/// overshoot state, where a single resident frame exceeds the whole budget.
///
/// # Arguments
/// * `cache` - Shared reference to the load cache
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_stats_reporter(cache: Arc<FrameCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache stats reporter with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats().await;
            info!(
                entries = stats.total_entries,
                total_bytes = stats.total_bytes,
                capacity_bytes = cache.capacity_bytes(),
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                hit_rate = format!("{:.2}", stats.hit_rate()),
                "Load cache statistics"
            );

            if stats.total_bytes > cache.capacity_bytes() && stats.total_entries == 1 {
                warn!(
                    total_bytes = stats.total_bytes,
                    capacity_bytes = cache.capacity_bytes(),
                    "Cache over budget: single resident frame exceeds capacity"
                );
            }
        }
    })
}
