pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::domain::{
    Achievement, CommitteeMember, Event, GalleryAlbum, Minutes, Notice, Report, Visit,
};
use state::{AppState, Collected};

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/register", post(handlers::auth::register))
        .nest("/public", public_routes())
        .nest("/admin", admin_routes(state.clone()))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::public::events))
        .route("/visits", get(handlers::public::visits))
        .route("/notices", get(handlers::public::notices))
        .route("/reports", get(handlers::public::reports))
        .route("/committee", get(handlers::public::committee))
        .route("/gallery", get(handlers::public::gallery))
        .route("/achievements", get(handlers::public::achievements))
        .route("/minutes", get(handlers::public::minutes))
        .route("/settings", get(handlers::public::site_settings))
        .route("/about", get(handlers::public::about))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(collection_routes::<Event>("/events", state.clone()))
        .merge(collection_routes::<Notice>("/notices", state.clone()))
        .merge(collection_routes::<Visit>("/visits", state.clone()))
        .merge(collection_routes::<CommitteeMember>("/committee", state.clone()))
        .merge(collection_routes::<GalleryAlbum>("/gallery", state.clone()))
        .merge(collection_routes::<Achievement>("/achievements", state.clone()))
        .merge(collection_routes::<Report>("/reports", state.clone()))
        .merge(collection_routes::<Minutes>("/minutes", state.clone()))
        .merge(settings_routes(state.clone()))
        .merge(about_routes(state.clone()))
        .merge(roster_routes(state))
}

/// The shared CRUD surface every managed content type gets. Listing is
/// open to any approved admin; everything else needs edit capability.
/// Collection roots are registered with and without the trailing slash
/// because axum's `nest` cannot match the bare `{prefix}/` form.
fn collection_routes<T: Collected>(prefix: &str, state: AppState) -> Router<AppState> {
    let mutating = Router::new()
        .route(prefix, post(handlers::admin::create::<T>))
        .route(&format!("{prefix}/"), post(handlers::admin::create::<T>))
        .route(&format!("{prefix}/:id"), put(handlers::admin::update::<T>))
        .route(&format!("{prefix}/:id"), delete(handlers::admin::remove::<T>))
        .route(&format!("{prefix}/:id/confirm-delete"), post(handlers::admin::confirm_delete::<T>))
        .route(&format!("{prefix}/:id/cancel-delete"), post(handlers::admin::cancel_delete::<T>))
        .route(&format!("{prefix}/:id/toggle"), post(handlers::admin::toggle::<T>))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_edit,
        ));

    Router::new()
        .route(prefix, get(handlers::admin::list::<T>))
        .route(&format!("{prefix}/"), get(handlers::admin::list::<T>))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_view,
        ))
        .merge(mutating)
}

fn settings_routes(state: AppState) -> Router<AppState> {
    let mutating = Router::new()
        .route("/settings", put(handlers::singletons::save_settings))
        .route("/settings/", put(handlers::singletons::save_settings))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_edit,
        ));

    Router::new()
        .route("/settings", get(handlers::singletons::get_settings))
        .route("/settings/", get(handlers::singletons::get_settings))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_view,
        ))
        .merge(mutating)
}

fn about_routes(state: AppState) -> Router<AppState> {
    let mutating = Router::new()
        .route("/about", put(handlers::singletons::save_about))
        .route("/about/", put(handlers::singletons::save_about))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_edit,
        ));

    Router::new()
        .route("/about", get(handlers::singletons::get_about))
        .route("/about/", get(handlers::singletons::get_about))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_view,
        ))
        .merge(mutating)
}

fn roster_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admins", get(handlers::admins::roster))
        .route("/admins/", get(handlers::admins::roster))
        .route("/admins/:uid/approve", post(handlers::admins::approve))
        .route("/admins/:uid/reject", post(handlers::admins::reject))
        .route("/admins/:uid/role", put(handlers::admins::change_role))
        .route("/admins/:uid", delete(handlers::admins::disable))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_superadmin,
        ))
}
