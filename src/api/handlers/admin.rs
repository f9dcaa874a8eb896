use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::forms::parse_submission;
use crate::api::state::{AppState, Collected};
use crate::content::Notification;
use crate::error::Result;

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub notification: Option<Notification>,
}

/// One set of handlers serves all eight managed content types; the
/// routers instantiate them per type.
pub async fn list<T: Collected>(State(state): State<AppState>) -> Result<Json<ListResponse<T>>> {
    let collection = T::collection(&state);
    let items = collection.list().await?;
    let notification = collection.notification().await;
    Ok(Json(ListResponse { items, notification }))
}

pub async fn create<T: Collected>(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<T>)> {
    let (values, files) = parse_submission(multipart, T::attachments()).await?;
    let item = T::collection(&state).submit_create(&values, files).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update<T: Collected>(
    Path(id): Path<String>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<T>> {
    let (values, files) = parse_submission(multipart, T::attachments()).await?;
    let item = T::collection(&state).submit_edit(&id, &values, files).await?;
    Ok(Json(item))
}

/// Arm deletion for one item. The actual DELETE is refused until this
/// has been called for the same id.
pub async fn confirm_delete<T: Collected>(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> StatusCode {
    T::collection(&state).begin_remove(&id).await;
    StatusCode::NO_CONTENT
}

pub async fn cancel_delete<T: Collected>(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> StatusCode {
    T::collection(&state).cancel_remove(&id).await;
    StatusCode::NO_CONTENT
}

pub async fn remove<T: Collected>(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    T::collection(&state).remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub field: String,
    pub value: serde_json::Value,
}

pub async fn toggle<T: Collected>(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<T>> {
    let item = T::collection(&state)
        .toggle_field(&id, &req.field, req.value)
        .await?;
    Ok(Json(item))
}
