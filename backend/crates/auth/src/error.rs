//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::application::config::ConfigError;
use crate::application::session_token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Client-facing detail for an unreadable request body.
///
/// serde's message can quote field values, passwords included.
pub const INVALID_BODY_DETAIL: &str = "Invalid JSON body";

/// Client-facing detail for every rejected session.
///
/// Missing cookie, forged signature and expiry all read the same.
pub const SESSION_REJECTED_DETAIL: &str = "Forbidden";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing request fields
    #[error("{0}")]
    Validation(String),

    /// Password does not satisfy the signup policy
    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// `confirmPassword` differs from `password`
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Incorrect user or password")]
    InvalidCredentials,

    /// Auth Gate rejection
    #[error("Session rejected")]
    SessionRejected,

    /// Token could not be issued or verified
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Hashing failure
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::PasswordPolicy(_)
            | AuthError::PasswordMismatch => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::SessionRejected => ErrorKind::Forbidden,
            AuthError::Token(e) if e.is_rejection() => ErrorKind::Forbidden,
            AuthError::Hashing(e) if e.is_input_error() => ErrorKind::BadRequest,
            AuthError::Token(_)
            | AuthError::Hashing(_)
            | AuthError::Config(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic detail; their cause only goes to
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::Forbidden => AppError::forbidden(SESSION_REJECTED_DETAIL),
            kind if kind.is_server_error() => AppError::new(kind, "Internal server error"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Config(e) => {
                tracing::error!(error = %e, "Auth configuration error");
            }
            AuthError::Hashing(e) if !e.is_input_error() => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Token(e) if !e.is_rejection() => {
                tracing::error!(error = %e, "Session token signing failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionRejected | AuthError::Token(_) => {
                tracing::debug!(reason = %self, "Session rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Field validation in value objects reports through `AppError`.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AuthError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Unreadable auth request body");
        AuthError::Validation(INVALID_BODY_DETAIL.to_string())
    }
}
