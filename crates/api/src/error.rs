//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use match_core::AccessDenied;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors a request can end in.
///
/// Business-rule failures are mapped explicitly where they arise. Only
/// unexpected storage outcomes become [`ApiError::Storage`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session (or another referenced record) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Session exists but its time window has lapsed.
    #[error("Session has expired")]
    Expired,

    /// Missing or unknown member token.
    #[error("{0}")]
    Unauthorized(String),

    /// Uniqueness violation surfaced to the client.
    #[error("{0}")]
    Conflict(String),

    /// Malformed request body.
    #[error("{0}")]
    InvalidInput(String),

    /// Underlying data store failure.
    #[error("{0}")]
    Storage(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Expired => StatusCode::GONE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map a storage failure to [`ApiError::Storage`], logging the cause.
pub fn storage(message: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| {
        tracing::error!(error = %err, "{}", message);
        ApiError::Storage(message)
    }
}

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::NotFound => ApiError::NotFound(denied.to_string()),
            AccessDenied::Expired => ApiError::Expired,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string()
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
