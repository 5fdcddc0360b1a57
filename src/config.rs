//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// One gibibyte, the default cache budget.
const GIB: usize = 1024 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for `*log*.csv` files
    pub log_dir: PathBuf,
    /// Byte budget for the load cache
    pub cache_capacity_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between cache statistics reports
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOG_DIR` - Directory containing log CSV files (default: ./logs)
    /// - `CACHE_CAPACITY_BYTES` - Cache byte budget (default: 1 GiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats report frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs")),
            cache_capacity_bytes: env::var("CACHE_CAPACITY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(GIB),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            stats_interval: env::var("STATS_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            cache_capacity_bytes: GIB,
            server_port: 3000,
            stats_interval: 60,
        }
    }
}
