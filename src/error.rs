//! Application error type shared across all layers.
//!
//! Every fallible operation between the repositories and the HTTP handlers
//! returns [`AppError`]. The variants map one-to-one onto HTTP status codes
//! via the [`IntoResponse`] implementation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

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

/// Request-level error with a machine-readable detail payload.
///
/// - `Validation` - user-correctable input problems (400)
/// - `NotFound` - unknown short code (404)
/// - `Conflict` - duplicate short code; recovered internally by the
///   shorten retry loop and normally never reaches a client (409)
/// - `Internal` - storage backend or I/O failure (500)
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
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
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// The human-readable message, without the detail payload.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

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
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        }

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

/// Translates a MongoDB driver error into an [`AppError`].
///
/// Duplicate-key write failures (server code 11000, a short-code collision)
/// become [`AppError::Conflict`] so the shorten path can retry with a fresh
/// code. Everything else is a storage failure.
pub fn map_mongo_error(e: mongodb::error::Error) -> AppError {
    use mongodb::error::{ErrorKind, WriteFailure};

    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = e.kind.as_ref()
        && write_error.code == 11000
    {
        return AppError::conflict(
            "Short code already exists",
            json!({ "server_code": write_error.code }),
        );
    }

    tracing::error!(error = %e, "MongoDB operation failed");
    AppError::internal("Storage error", json!({ "backend": "mongodb" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_message() {
        let err = AppError::bad_request("Invalid URL", json!({ "reason": "missing scheme" }));
        assert_eq!(err.to_string(), "Invalid URL");
    }

    #[test]
    fn test_constructors_pick_variant() {
        assert!(matches!(
            AppError::not_found("x", json!({})),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            AppError::conflict("x", json!({})),
            AppError::Conflict { .. }
        ));
        assert!(matches!(
            AppError::internal("x", json!({})),
            AppError::Internal { .. }
        ));
    }
}
