//! Background Tasks Module
//!
//! Long-running tasks spawned alongside the HTTP server.

mod report;

pub use report::spawn_stats_reporter;
