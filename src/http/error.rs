//! HTTP mapping of domain errors.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorCode, TrackerError};

/// JSON body for 4xx/5xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

pub fn status_for(err: &TrackerError) -> StatusCode {
    match err {
        TrackerError::ValidationFailed { .. } | TrackerError::UserAlreadyExists => {
            StatusCode::BAD_REQUEST
        }
        TrackerError::UserDoesNotExist
        | TrackerError::TaskDoesNotExist
        | TrackerError::NoTasksForUser => StatusCode::NO_CONTENT,
        TrackerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status == StatusCode::NO_CONTENT {
            debug!(code = ?self.code(), "{}", self);
            return status.into_response();
        }

        let body = ErrorBody {
            code: self.code(),
            // Display of Internal never includes the cause
            message: self.to_string(),
            field: self.field().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for TrackerError {
    fn from(rejection: JsonRejection) -> Self {
        TrackerError::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for TrackerError {
    fn from(rejection: QueryRejection) -> Self {
        TrackerError::validation("query", rejection.body_text())
    }
}

impl From<PathRejection> for TrackerError {
    fn from(rejection: PathRejection) -> Self {
        TrackerError::validation("path", rejection.body_text())
    }
}
