//! Logly - backend for plotting large CSV time-series logs
//!
//! Serves log file listings, fields, and line-chart traces over HTTP,
//! with a memory-bounded memoization cache in front of CSV loading.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod frame;
pub mod loader;
pub mod models;
pub mod series;
pub mod tasks;

pub use api::{AppState, FrameCache};
pub use cache::MemoCache;
pub use config::Config;
pub use error::LoglyError;
pub use frame::LogFrame;
pub use tasks::spawn_stats_reporter;
