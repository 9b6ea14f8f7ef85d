//! Error taxonomy: wrong-role failures map to 403, missing resources to 404,
//! precondition/cooldown failures to 400, and everything unexpected to 500.
//! Passphrase mismatches are deliberately *not* errors (see the tag service).

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, state::rules::RuleViolation};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Actor lacks the role the action requires.
    #[error("{0}")]
    Forbidden(String),
    /// Request lacks a usable session token.
    #[error("{0}")]
    Unauthorized(String),
    /// A cooldown or consumable precondition failed.
    #[error("{0}")]
    Precondition(String),
    /// Invalid input provided by the client.
    #[error("{0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// Persistence failed; in-memory state may be ahead of disk.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl From<RuleViolation> for ServiceError {
    fn from(violation: RuleViolation) -> Self {
        if violation.is_role_failure() {
            ServiceError::Forbidden(violation.to_string())
        } else {
            ServiceError::Precondition(violation.to_string())
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input or a failed precondition.
    #[error("{0}")]
    BadRequest(String),
    /// Missing credentials.
    #[error("{0}")]
    Unauthorized(String),
    /// Actor is not allowed to perform the action.
    #[error("{0}")]
    Forbidden(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Forbidden(message) => AppError::Forbidden(message),
            ServiceError::Unauthorized(message) => AppError::Unauthorized(message),
            ServiceError::Precondition(message) => AppError::BadRequest(message),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Storage(source) => AppError::Internal(source.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
