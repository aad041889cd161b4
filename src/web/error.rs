//! API error handling for the Courrier Web API.
//!
//! Every error response shares the envelope
//! `{"success": false, "message": ..., "errors": [...]}`.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::CourrierError;

/// Whether internal error details are redacted from responses.
///
/// Set once at startup from the configured environment.
static REDACT_INTERNAL: AtomicBool = AtomicBool::new(false);

/// Enable or disable redaction of internal error details (production mode).
pub fn set_redact_internal(redact: bool) {
    REDACT_INTERNAL.store(redact, Ordering::Relaxed);
}

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad input or business-rule violation (400).
    Validation,
    /// Bad credentials or bad/expired token (401).
    Authentication,
    /// Caller is not the resource owner (403).
    Authorization,
    /// Referenced entity absent (404).
    NotFound,
    /// Uncaught fault (500).
    Internal,
    /// Storage unreachable (503).
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::Authentication => StatusCode::UNAUTHORIZED,
            ErrorCode::Authorization => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Offending field name.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    errors: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Create a validation error (400).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Create an authentication error (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Authentication, message)
    }

    /// Create an authorization error (403).
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Authorization, message)
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Create a service unavailable error (503).
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create a validation error with field-level details.
    pub fn with_fields(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::Validation,
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Create a validation error from validator::ValidationErrors.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}")),
                })
            })
            .collect();

        Self::with_fields("validation failed", fields)
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            success: false,
            message: self.message,
            errors: self.errors,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<CourrierError> for ApiError {
    fn from(err: CourrierError) -> Self {
        match &err {
            CourrierError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            CourrierError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            CourrierError::Validation(msg) => ApiError::validation(msg.clone()),
            CourrierError::Permission(msg) => ApiError::forbidden(msg.clone()),
            CourrierError::DatabaseConnection(msg) => {
                tracing::error!("Storage unreachable: {}", msg);
                ApiError::unavailable("service temporarily unavailable")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                if REDACT_INTERNAL.load(Ordering::Relaxed) {
                    ApiError::internal("internal server error")
                } else {
                    ApiError::internal(err.to_string())
                }
            }
        }
    }
}
