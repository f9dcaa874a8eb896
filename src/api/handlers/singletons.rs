use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::api::forms::parse_submission;
use crate::api::state::AppState;
use crate::domain::{AboutContent, SingletonRecord, SiteSettings};
use crate::error::Result;

pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.site_settings.get().await?))
}

pub async fn save_settings(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SiteSettings>> {
    let (values, files) = parse_submission(multipart, SiteSettings::attachments()).await?;
    Ok(Json(state.site_settings.save(&values, files).await?))
}

pub async fn get_about(State(state): State<AppState>) -> Result<Json<AboutContent>> {
    Ok(Json(state.about.get().await?))
}

pub async fn save_about(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AboutContent>> {
    let (values, files) = parse_submission(multipart, AboutContent::attachments()).await?;
    Ok(Json(state.about.save(&values, files).await?))
}
