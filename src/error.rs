use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Update failed: {0}")]
    Update(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Malformed document in {collection}: {reason}")]
    Decode { collection: String, reason: String },

    #[error("Invalid register code")]
    InvalidCode,

    #[error("Identity creation failed: {0}")]
    IdentityCreation(String),

    #[error("Could not verify admin approval: {0}")]
    AuthLookup(String),

    #[error("Account is not approved")]
    NotApproved,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Upload(msg) => {
                tracing::warn!("Upload error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Image upload failed")
            }
            AppError::Write(msg) => {
                tracing::error!("Write error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Failed to save the record")
            }
            AppError::Update(msg) => {
                tracing::error!("Update error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Failed to update the record")
            }
            AppError::Delete(msg) => {
                tracing::error!("Delete error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Failed to delete the record")
            }
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Document store unavailable")
            }
            AppError::Decode { collection, reason } => {
                tracing::error!("Malformed document in {}: {}", collection, reason);
                (StatusCode::INTERNAL_SERVER_ERROR, "Malformed document")
            }
            AppError::InvalidCode => (StatusCode::BAD_REQUEST, "Invalid register code"),
            AppError::IdentityCreation(msg) => {
                tracing::warn!("Identity creation rejected: {}", msg);
                (StatusCode::BAD_REQUEST, "Could not create the account")
            }
            // Auth failures send the caller back to login rather than
            // surfacing a notification, so they carry 401 instead of 5xx.
            AppError::AuthLookup(msg) => {
                tracing::error!("Auth lookup failed: {}", msg);
                (StatusCode::UNAUTHORIZED, "Could not verify admin approval")
            }
            AppError::NotApproved => (
                StatusCode::UNAUTHORIZED,
                "Your account is not approved. Please contact an administrator.",
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Store(err.to_string())
    }
}
