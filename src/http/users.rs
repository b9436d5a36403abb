//! `/v1/users` handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::server::AppState;
use crate::error::TrackerError;
use crate::validation::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserInfoQuery};

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, TrackerError> {
    let Json(req) = body?;
    let user = state.validator.new_user(req)?;
    let user = state.tracker.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, TrackerError> {
    let Path(id) = path?;
    let id = state.validator.id("id", &id)?;
    state.tracker.delete_user(id).await?;
    Ok(StatusCode::OK)
}

pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<StatusCode, TrackerError> {
    let Path(id) = path?;
    let id = state.validator.id("id", &id)?;
    let Json(req) = body?;
    let patch = state.validator.user_patch(req)?;
    state.tracker.update_user(id, patch).await?;
    Ok(StatusCode::OK)
}

/// An empty page is 204 rather than an empty array.
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Response, TrackerError> {
    let Query(query) = query?;
    let (filter, page) = state.validator.user_query(&query)?;
    let users = state.tracker.list_users(filter, page).await?;
    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(users).into_response())
}

pub async fn user_info(
    State(state): State<AppState>,
    query: Result<Query<UserInfoQuery>, QueryRejection>,
) -> Result<Response, TrackerError> {
    let Query(query) = query?;
    let (series, number) = state.validator.passport_parts(query)?;
    let info = state.tracker.user_info(series, number).await?;
    Ok(Json(info).into_response())
}
