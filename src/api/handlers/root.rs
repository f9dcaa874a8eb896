use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "ChapterDesk",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Content and admin console for a student chapter website",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "public": "/public",
            "auth": "/auth/login",
            "admin": "/admin"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
