use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::state::AppState;
use crate::auth::{SessionGuard, SESSION_COOKIE};
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub role: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (admin, token) = state.guard.login(&req.email, &req.password).await?;
    let cookie = state.guard.session_cookie(&token);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            email: admin.email,
            role: admin.role.as_str().to_string(),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(err) = state.guard.logout(cookie.value()).await {
            tracing::warn!("logout cleanup failed: {}", err);
        }
    }
    Ok((jar.add(SessionGuard::logout_cookie()), StatusCode::NO_CONTENT))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub email: String,
    pub status: String,
}

/// Self-service registration. A successful call leaves the caller
/// pending, not signed in; approval is a separate superadmin action.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pending = state
        .guard
        .register(&req.email, &req.password, &req.code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: pending.email,
            status: pending.status,
        }),
    ))
}
