//! `/v1/tasks` handlers.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::server::AppState;
use crate::error::TrackerError;
use crate::validation::ReportQuery;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTaskResponse {
    pub finished_at: DateTime<Utc>,
}

pub async fn start_task(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, TrackerError> {
    let Path(user_id) = path?;
    let user_id = state.validator.id("userId", &user_id)?;
    let task = state.tracker.start_task(user_id).await?;
    Ok((StatusCode::CREATED, Json(task)).into_response())
}

pub async fn end_task(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EndTaskResponse>, TrackerError> {
    let Path(id) = path?;
    let id = state.validator.id("id", &id)?;
    let finished_at = state.tracker.end_task(id).await?;
    Ok(Json(EndTaskResponse { finished_at }))
}

pub async fn summary_time(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, TrackerError> {
    let Path(user_id) = path?;
    let user_id = state.validator.id("userId", &user_id)?;
    let Query(query) = query?;
    let range = state.validator.time_range(&query)?;
    let report = state.tracker.task_report(user_id, range).await?;
    Ok(Json(report).into_response())
}
