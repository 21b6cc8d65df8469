//! HTTP-facing error type and the mapping from service errors.
//!
//! Every error leaves the service as
//!
//! ```json
//! { "error": { "code": "conflict", "message": "...", "details": { ... } } }
//! ```
//!
//! Storage failures are logged here and rendered as a generic internal error,
//! so no backend detail reaches clients.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

use crate::domain::errors::ShortenError;
use crate::utils::code_validator::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

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

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts into the serializable payload.
    pub fn to_error_info(self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortenError> for AppError {
    fn from(err: ShortenError) -> Self {
        match err {
            ShortenError::UserNotFound => AppError::not_found("User not found", json!({})),
            ShortenError::NotFound => AppError::not_found("Link not found", json!({})),
            ShortenError::InvalidUrl => AppError::bad_request(
                "URL is invalid",
                json!({ "reason": "must be an absolute URI" }),
            ),
            ShortenError::InvalidCode => AppError::bad_request(
                "Short code is invalid",
                json!({
                    "min_length": MIN_CODE_LENGTH,
                    "max_length": MAX_CODE_LENGTH,
                    "allowed": "letters, digits, '-' and '_'",
                }),
            ),
            ShortenError::CodeExists => AppError::conflict("Short code already exists", json!({})),
            ShortenError::UrlAlreadyShortened { code } => AppError::conflict(
                "URL already shortened",
                json!({ "existing_code": code }),
            ),
            ShortenError::EmailExists => AppError::conflict("Email already exists", json!({})),
            ShortenError::GenerationExhausted => {
                AppError::internal("System is busy, try again later", json!({}))
            }
            ShortenError::Store(e) => {
                error!(error = %e, "Storage failure");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("Invalid JSON body", json!({ "reason": rejection.body_text() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ShortenError::UserNotFound, StatusCode::NOT_FOUND),
            (ShortenError::NotFound, StatusCode::NOT_FOUND),
            (ShortenError::InvalidUrl, StatusCode::BAD_REQUEST),
            (ShortenError::InvalidCode, StatusCode::BAD_REQUEST),
            (ShortenError::CodeExists, StatusCode::CONFLICT),
            (
                ShortenError::UrlAlreadyShortened {
                    code: "abc".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (ShortenError::EmailExists, StatusCode::CONFLICT),
            (
                ShortenError::GenerationExhausted,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_url_already_shortened_carries_existing_code() {
        let info = AppError::from(ShortenError::UrlAlreadyShortened {
            code: "abc123".to_string(),
        })
        .to_error_info();

        assert_eq!(info.code, "conflict");
        assert_eq!(info.details["existing_code"], "abc123");
    }

    #[test]
    fn test_store_errors_do_not_leak_detail() {
        let err = AppError::from(ShortenError::Store(StoreError::backend(anyhow::anyhow!(
            "password authentication failed for user \"admin\""
        ))));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let info = err.to_error_info();
        assert_eq!(info.message, "Internal server error");
        assert_eq!(info.details, json!({}));
    }
}
