//! Post Error Types
//!
//! Post-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Post-specific result type alias
pub type PostResult<T> = Result<T, PostError>;

/// Post-specific error variants
#[derive(Debug, Error)]
pub enum PostError {
    /// No post with that id (also used for ids that are not integers)
    #[error("Post not found")]
    NotFound,

    /// Invalid title, content or status
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PostError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::NotFound => ErrorKind::NotFound,
            PostError::Validation(_) => ErrorKind::BadRequest,
            PostError::Database(_) | PostError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            PostError::Database(_) | PostError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PostError::Database(e) => {
                tracing::error!(error = %e, "Post database error");
            }
            PostError::Internal(msg) => {
                tracing::error!(message = %msg, "Post internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Post error");
            }
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for PostError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => PostError::Validation(err.message().to_string()),
            _ => PostError::Internal(err.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for PostError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        PostError::Validation(rejection.body_text())
    }
}
