//! API Handlers
//!
//! HTTP request handlers for each log service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::MemoCache;
use crate::config::Config;
use crate::error::{LoglyError, Result};
use crate::frame::LogFrame;
use crate::loader;
use crate::models::{
    validate_file_name, FieldsResponse, FilesResponse, HealthResponse, SeriesRequest,
    SeriesResponse, StatsResponse,
};
use crate::series::{build_series, DEFAULT_FILTER_FIELDS};

/// The load cache specialized to this service: file name to loaded frame.
pub type FrameCache = MemoCache<String, LogFrame, LoglyError>;

/// Application state shared across all handlers.
///
/// The cache is constructed once here and owns every loaded frame for the
/// lifetime of the process; handlers only ever receive shared `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<FrameCache>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state from configuration.
    pub fn new(config: Config) -> Self {
        let cache = FrameCache::new(config.cache_capacity_bytes);
        Self {
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }

    /// Loads a log file through the cache.
    ///
    /// The parse runs on the blocking pool; concurrent requests for the same
    /// file share a single parse.
    pub async fn load_frame(&self, name: &str) -> Result<Arc<LogFrame>> {
        let path = self.config.log_dir.join(name);
        self.cache
            .get_or_compute(name.to_string(), || async move {
                tokio::task::spawn_blocking(move || loader::load_frame(&path))
                    .await
                    .map_err(|e| LoglyError::Internal(format!("load task failed: {e}")))?
            })
            .await
    }
}

/// Handler for GET /files
///
/// Lists `*log*.csv` files available in the configured log directory.
pub async fn files_handler(State(state): State<AppState>) -> Result<Json<FilesResponse>> {
    let names = loader::list_log_files(&state.config.log_dir)?;
    Ok(Json(FilesResponse::new(names)))
}

/// Handler for GET /files/:name/fields
///
/// Loads a file (through the cache) and returns its plottable fields plus
/// the subset the dashboard selects by default.
pub async fn fields_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FieldsResponse>> {
    if let Some(reason) = validate_file_name(&name) {
        return Err(LoglyError::InvalidRequest(reason));
    }

    let frame = state.load_frame(&name).await?;
    let fields: Vec<String> = frame.fields().into_iter().map(String::from).collect();
    let defaults = fields
        .iter()
        .filter(|field| DEFAULT_FILTER_FIELDS.contains(&field.as_str()))
        .cloned()
        .collect();

    Ok(Json(FieldsResponse {
        file: name,
        fields,
        defaults,
    }))
}

/// Handler for POST /series
///
/// Loads a file (through the cache) and returns one trace per selected
/// field, optionally trimmed to the power-on point and normalized.
pub async fn series_handler(
    State(state): State<AppState>,
    Json(req): Json<SeriesRequest>,
) -> Result<Json<SeriesResponse>> {
    if let Some(reason) = req.validate() {
        return Err(LoglyError::InvalidRequest(reason));
    }

    let frame = state.load_frame(&req.file).await?;
    let traces = build_series(&frame, &req.fields, req.normalized, req.from_power_on);

    Ok(Json(SeriesResponse {
        file: req.file,
        traces,
    }))
}

/// Handler for GET /stats
///
/// Returns current load cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(&stats, state.cache.capacity_bytes()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
