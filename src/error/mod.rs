// Error types for recipebox
// Author: kelexine (https://github.com/kelexine)

use crate::models::{InvalidRecipeId, RecipeId};
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by a recipe store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No recipe found with id {0}")]
    NotFound(RecipeId),

    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    #[error("Unsupported connection scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl ApiError {
    /// Flat mapping used by create, list, update and delete: every store
    /// failure becomes a 400 carrying the store's own message.
    pub fn from_store_flat(err: StoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }

    /// Mapping used by get-one, which tells a missing record apart from an
    /// unreachable store.
    pub fn from_store_lookup(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => ApiError::ServiceUnavailable(err.to_string()),
            other => ApiError::NotFound(other.to_string()),
        }
    }

    /// Body rejections keep 413 for oversized payloads; everything else
    /// about a malformed body is a 400.
    fn from_body_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Config(_) | ApiError::ConfigParsing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidRecipeId> for ApiError {
    fn from(err: InvalidRecipeId) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from_body_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::from_body_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// `{ "error": ... }` body shared by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Convert ApiError to HTTP responses for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
