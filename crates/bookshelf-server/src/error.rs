//! API error types with JSON responses.
//!
//! Every failure that leaves a handler passes through [`ApiError`]. Field
//! validation failures render as a bare `{ field: message }` object; all
//! other failures render as an [`ErrorResponse`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;
use crate::validation::FieldErrors;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more fields failed validation (400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Request could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Referenced book does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Book with the same title and author already exists (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Short, fixed label for the `error` field of the response body.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => "Bad Request.",
            Self::NotFound(_) => "Book Not Found.",
            Self::Conflict(_) => "Duplicate Book.",
            Self::Internal(_) => "Internal Server Error.",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::Duplicate { .. } => Self::Conflict(err.to_string()),
            ServiceError::Fetch { ref source, .. } => {
                tracing::error!(error = %err, cause = %source, "Book lookup failed");
                Self::Internal(err.to_string())
            }
            ServiceError::Store(ref source) => {
                tracing::error!(error = %source, "Storage operation failed");
                Self::Internal("storage operation failed".to_string())
            }
        }
    }
}

/// JSON error body for domain-level failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Status name (e.g., "NOT_FOUND").
    pub status: String,
    /// Short error label (e.g., "Book Not Found.").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Validation(errors) = self {
            tracing::debug!(%errors, "Rejected invalid request");
            return (status, Json(errors)).into_response();
        }

        let body = ErrorResponse {
            timestamp: Utc::now(),
            status: self.code().to_string(),
            error: self.label().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
