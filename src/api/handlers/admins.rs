use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::auth::CurrentAdmin;
use crate::api::state::AppState;
use crate::domain::{AdminAccount, AdminRole, PendingAdmin};
use crate::error::Result;

#[derive(Serialize)]
pub struct RosterResponse {
    pub admins: Vec<AdminAccount>,
    pub pending: Vec<PendingAdmin>,
}

pub async fn roster(State(state): State<AppState>) -> Result<Json<RosterResponse>> {
    let admins = state.guard.list_admins().await?;
    let pending = state.guard.list_pending().await?;
    Ok(Json(RosterResponse { admins, pending }))
}

pub async fn approve(
    Path(uid): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AdminAccount>> {
    Ok(Json(state.guard.approve(&uid).await?))
}

pub async fn reject(
    Path(uid): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.guard.reject(&uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: AdminRole,
}

pub async fn change_role(
    Path(uid): Path<String>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAdmin>,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<AdminAccount>> {
    let admin = state
        .guard
        .change_role(&current.session.uid, &uid, req.role)
        .await?;
    Ok(Json(admin))
}

pub async fn disable(
    Path(uid): Path<String>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAdmin>,
) -> Result<StatusCode> {
    state.guard.disable(&current.session.uid, &uid).await?;
    Ok(StatusCode::NO_CONTENT)
}
