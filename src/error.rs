use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Errors from the favorites store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field was missing or empty
    #[error("{0}")]
    Validation(String),

    /// The underlying SQLite statement failed
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database directory could not be created
    #[error("failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the upstream recipe catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request never completed
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// The response body was not the expected envelope
    #[error("failed to decode upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error surfaced by an API handler.
///
/// Validation problems keep their message and map to 400; upstream and
/// storage failures are logged in full and flattened to a short per-operation
/// message with status 500.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{op}")]
    Upstream {
        op: &'static str,
        source: CatalogError,
    },

    #[error("{op}")]
    Storage {
        op: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn upstream(op: &'static str, source: CatalogError) -> Self {
        ApiError::Upstream { op, source }
    }

    pub fn storage(op: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::Validation(message) => ApiError::Validation(message),
            other => ApiError::Storage { op, source: other },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream { op, source } => {
                error!("{op}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, op.to_string())
            }
            ApiError::Storage { op, source } => {
                error!("{op}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, op.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
