//! Error types for the log service
//!
//! Provides unified error handling using thiserror.
//!
//! The enum is `Clone` on purpose: when several concurrent requests wait on
//! the same in-flight load, each waiter receives its own copy of the one
//! failure that actually occurred.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Logly Error Enum ==
/// Unified error type for the log service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoglyError {
    /// Requested log file does not exist in the log directory
    #[error("Log file not found: {0}")]
    FileNotFound(String),

    /// Log file could not be read or parsed
    #[error("Failed to load '{path}': {reason}")]
    Load { path: String, reason: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LoglyError {
    fn into_response(self) -> Response {
        let status = match &self {
            LoglyError::FileNotFound(_) => StatusCode::NOT_FOUND,
            LoglyError::Load { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LoglyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LoglyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the log service.
pub type Result<T> = std::result::Result<T, LoglyError>;
