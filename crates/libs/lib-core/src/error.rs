//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the core, auth, and web crates. It follows the `thiserror` pattern for
//! ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **User-facing errors** - shown to the user with a way to retry
//!    - [`Validation`](AppError::Validation) → 400 Bad Request
//!    - [`Conflict`](AppError::Conflict) → 409 Conflict
//!    - [`Auth`](AppError::Auth) → 401 Unauthorized
//!    - [`Unauthenticated`](AppError::Unauthenticated) → 401 (the web layer redirects home instead)
//!
//! 2. **Server errors** - logged in full, surfaced as a generic failure
//!    - [`Store`](AppError::Store) → 500 Internal Server Error
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(AppError::Validation(
//!             "\"name\" is not allowed to be empty".to_string()
//!         ));
//!     }
//!     Ok(name)
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use lib_utils::escape_html;
use thiserror::Error;

/// Message for every credential failure. Unknown email and wrong password
/// are indistinguishable to the caller.
pub const INVALID_CREDENTIALS: &str = "Invalid email/password combination.";

/// Message for a signup whose email is already taken.
pub const EMAIL_TAKEN: &str = "Email already registered.";

/// Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input. The message is the first violated rule.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The identity being created already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials. Always carries [`INVALID_CREDENTIALS`].
    #[error("Authentication failed")]
    Auth,

    /// No active session.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Persistent or session store failure (connectivity, IO, corrupt rows).
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Auth | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Auth => INVALID_CREDENTIALS.to_string(),
            AppError::Unauthenticated => "Please log in first.".to_string(),
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Whether the error is the user's to fix (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Html(format!(
            "<p>{}</p>\n<a href=\"/\">Go Home</a>\n",
            escape_html(&message)
        ));

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
///
/// A unique-constraint violation can only come from `users.email`, so it is
/// reported as the duplicate-email conflict.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(EMAIL_TAKEN.to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Store(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Store(format!("Database error: {}", err)),
        }
    }
}

/// Convert `sqlx::migrate::MigrateError` to `AppError`.
impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Store(format!("Migration error: {}", err))
    }
}

/// Convert password hashing failures to `AppError`.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert environment lookup failures to `AppError`.
impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Auth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Store("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Store("disk I/O error at /var/lib/members.db".into());
        assert_eq!(err.user_message(), "An internal error occurred");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_auth_message_is_generic() {
        assert_eq!(AppError::Auth.user_message(), INVALID_CREDENTIALS);
    }

    #[test]
    fn test_row_not_found_is_store_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Store(_)));
    }
}
