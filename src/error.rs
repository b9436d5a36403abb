//! Domain error kinds shared by the store, the service and the HTTP layer.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Conflict errors
    UserAlreadyExists,

    // Not found errors
    UserDoesNotExist,
    TaskDoesNotExist,
    NoTasksForUser,

    // Validation errors
    ValidationFailed,

    // Internal errors
    InternalError,
}

/// Closed set of failures surfaced by the tracker core.
///
/// Only the storage error translator (`db::error`) inspects raw storage
/// detail; everything above it matches on these variants.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user does not exist")]
    UserDoesNotExist,

    #[error("task does not exist")]
    TaskDoesNotExist,

    #[error("no tasks for this user")]
    NoTasksForUser,

    #[error("invalid {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl TrackerError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TrackerError::UserAlreadyExists => ErrorCode::UserAlreadyExists,
            TrackerError::UserDoesNotExist => ErrorCode::UserDoesNotExist,
            TrackerError::TaskDoesNotExist => ErrorCode::TaskDoesNotExist,
            TrackerError::NoTasksForUser => ErrorCode::NoTasksForUser,
            TrackerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TrackerError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Field name carried by validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            TrackerError::ValidationFailed { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type for tracker operations.
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
