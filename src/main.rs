use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chapterdesk::api::{self, state::AppState};
use chapterdesk::config::Settings;
use chapterdesk::{identity, store, uploader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chapterdesk=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting ChapterDesk server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let store = store::from_config(&settings.store)?;
    let uploader = uploader::from_config(&settings.uploader)?;
    let identity = identity::from_config(&settings.identity)?;

    let state = AppState::new(store, uploader, identity, Arc::new(settings.clone()));

    // Forced sign-out for unapproved identities runs for the lifetime
    // of the server.
    state.guard.spawn_watcher();

    let app = api::create_app(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
