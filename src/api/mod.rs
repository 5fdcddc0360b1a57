//! API Module
//!
//! HTTP layer for the log service: route configuration, request handlers,
//! and shared application state.

mod handlers;
mod routes;

pub use handlers::{
    fields_handler, files_handler, health_handler, series_handler, stats_handler, AppState,
    FrameCache,
};
pub use routes::create_router;
