//! Request-boundary error type.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use spendlog_core::ValidationError;

/// Errors surfaced to HTTP clients. Validation failures are the client's
/// fault; storage and file I/O failures are the service's. Every variant
/// becomes a structured JSON response, never a crash.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected request; nothing was persisted.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Malformed multipart body.
    #[error("invalid form submission: {0}")]
    Multipart(#[from] MultipartError),

    /// Database connection or write failure.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// Upload or export file failure.
    #[error("file I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet serialization failure.
    #[error("export failure: {0}")]
    Export(#[from] csv::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Io(_) | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
