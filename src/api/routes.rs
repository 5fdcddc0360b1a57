//! API Routes
//!
//! Configures the Axum router with all log service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fields_handler, files_handler, health_handler, series_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /files` - List log files available for plotting
/// - `GET /files/:name/fields` - List a file's plottable fields
/// - `POST /series` - Build line-chart traces for selected fields
/// - `GET /stats` - Get load cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (the dashboard runs on a different port)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/files", get(files_handler))
        .route("/files/:name/fields", get(fields_handler))
        .route("/series", post(series_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
