//! Error types for Bookrate
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by outcome (not-found, forbidden, validation, ...) so
//! the HTTP layer can map each variant to exactly one status code.
//!
//! # Status Code Mapping
//! - `NotFound` → 404
//! - `Forbidden` → 403
//! - `Conflict` → 406 (duplicate username/email on registration)
//! - `Validation` → 422 (rejected before persistence)
//! - `Unauthorized` → 401 (+ `WWW-Authenticate: Bearer`)
//! - `BadRequest` → 400 (login failures)
//! - everything else → 500

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type alias using our ApiError type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for Bookrate
///
/// Every fallible function in the crate returns this type. Client-facing
/// variants carry the descriptive message that ends up in the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Client errors =====

    /// Lookup by id or username found nothing
    #[error("{0}")]
    NotFound(String),

    /// Mutation of a resource owned by another user
    #[error("{0}")]
    Forbidden(String),

    /// Unique constraint would be violated (duplicate username/email)
    #[error("{0}")]
    Conflict(String),

    /// Input rejected before persistence (bounds, format, confirmation)
    #[error("{0}")]
    Validation(String),

    /// Missing, malformed, expired token, or unresolvable subject
    #[error("{0}")]
    Unauthorized(String),

    /// Request understood but cannot be served (wrong credentials)
    #[error("{0}")]
    BadRequest(String),

    // ===== Server errors =====

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal error that should not normally occur
    #[error("Internal error: {0}")]
    Internal(String),

    // ===== External library errors =====
    // Automatic conversions from external error types

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Password hashing error from bcrypt
    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl ApiError {
    /// Create a NotFound error with a message
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Create a Validation error with a message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        ApiError::Validation(message.into())
    }

    /// Create a Conflict error with a message
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        ApiError::Conflict(message.into())
    }

    /// Create an Unauthorized error with a message
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Create an Internal error with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        ApiError::Internal(message.into())
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if error is caused by the client request
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Never leak driver/internal details to clients
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "detail": detail }));
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
