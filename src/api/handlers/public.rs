use axum::{extract::State, Json};
use chrono::Utc;

use crate::api::state::AppState;
use crate::content::fetch_all;
use crate::domain::{
    Achievement, CommitteeMember, Event, GalleryAlbum, Minutes, Notice, Report, Visit,
};
use crate::error::Result;
use crate::view::{self, EventsView, NoticesView, VisitsView};

pub async fn events(State(state): State<AppState>) -> Result<Json<EventsView>> {
    let events = fetch_all::<Event>(state.store.as_ref()).await?;
    Ok(Json(view::events_view(events, Utc::now())))
}

pub async fn visits(State(state): State<AppState>) -> Result<Json<VisitsView>> {
    let visits = fetch_all::<Visit>(state.store.as_ref()).await?;
    Ok(Json(view::visits_view(visits, Utc::now().date_naive())))
}

pub async fn notices(State(state): State<AppState>) -> Result<Json<NoticesView>> {
    let notices = fetch_all::<Notice>(state.store.as_ref()).await?;
    Ok(Json(view::notices_view(notices)))
}

pub async fn reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>> {
    let reports = fetch_all::<Report>(state.store.as_ref()).await?;
    Ok(Json(view::reports_view(reports)))
}

pub async fn committee(State(state): State<AppState>) -> Result<Json<Vec<CommitteeMember>>> {
    let members = fetch_all::<CommitteeMember>(state.store.as_ref()).await?;
    Ok(Json(view::committee_view(members)))
}

// Albums come back newest-first from the query itself; no further
// filtering applies.
pub async fn gallery(State(state): State<AppState>) -> Result<Json<Vec<GalleryAlbum>>> {
    let albums = fetch_all::<GalleryAlbum>(state.store.as_ref()).await?;
    Ok(Json(albums))
}

pub async fn minutes(State(state): State<AppState>) -> Result<Json<Vec<Minutes>>> {
    let minutes = fetch_all::<Minutes>(state.store.as_ref()).await?;
    Ok(Json(view::minutes_view(minutes)))
}

pub async fn achievements(State(state): State<AppState>) -> Result<Json<Vec<Achievement>>> {
    let achievements = fetch_all::<Achievement>(state.store.as_ref()).await?;
    Ok(Json(view::achievements_view(achievements)))
}

pub async fn site_settings(
    State(state): State<AppState>,
) -> Result<Json<crate::domain::SiteSettings>> {
    Ok(Json(state.site_settings.get().await?))
}

pub async fn about(State(state): State<AppState>) -> Result<Json<crate::domain::AboutContent>> {
    Ok(Json(state.about.get().await?))
}
