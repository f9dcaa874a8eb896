use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::api::state::AppState;
use crate::auth::{authorize, Capability, Session, SESSION_COOKIE};
use crate::error::AppError;

/// The validated session of the admin making the request, inserted into
/// request extensions by the middleware below.
#[derive(Clone)]
pub struct CurrentAdmin {
    pub session: Session,
}

async fn resolve_session(state: &AppState, jar: &CookieJar) -> Result<Session, AppError> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
    state
        .guard
        .validate_session(cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Console access: any approved admin, including read-only ones.
pub async fn require_view(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = resolve_session(&state, &jar).await?;
    request.extensions_mut().insert(CurrentAdmin { session });
    Ok(next.run(request).await)
}

/// Mutating content routes. Read-only admins get a 403 here rather
/// than at the store.
pub async fn require_edit(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = resolve_session(&state, &jar).await?;
    if !authorize(session.role, Capability::EditContent) {
        return Err(AppError::Forbidden(
            "Your role does not allow editing content".to_string(),
        ));
    }
    request.extensions_mut().insert(CurrentAdmin { session });
    Ok(next.run(request).await)
}

/// Admin roster management is superadmin territory.
pub async fn require_superadmin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = resolve_session(&state, &jar).await?;
    if !authorize(session.role, Capability::ManageAdmins) {
        return Err(AppError::Forbidden(
            "Only a superadmin can manage administrators".to_string(),
        ));
    }
    request.extensions_mut().insert(CurrentAdmin { session });
    Ok(next.run(request).await)
}
