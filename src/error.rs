//! Application error taxonomy and HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. Validation and
//! conflict errors are detected before any store mutation; storage failures on
//! synchronous paths surface as `Internal`. The asynchronous click-recording
//! path is the only place where errors are absorbed (see
//! [`crate::domain::click_worker`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Service-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input (URL, slug, expiry, missing caller identity). 400.
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// Unknown id or slug. 404.
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Slug already owned by an existing link. 409.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    /// Link exists but is inactive or expired. 410.
    #[error("{message}")]
    Gone { message: String, details: Value },
    /// Storage backend failure or other internal fault. 500.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Gone { message, details } => (StatusCode::GONE, "gone", message, details),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps low-level sqlx errors to the application taxonomy.
///
/// A unique-constraint violation on the slug column becomes a [`AppError::Conflict`];
/// everything else is a generic storage failure.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Slug already in use",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::internal("Storage error", json!({}))
}
