pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use block_sync::SyncConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::BlockStore;
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BlockStore>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(sync: SyncConfig) -> Self {
        let store = Arc::new(BlockStore::new());
        let sessions = Arc::new(SessionRegistry::new(sync, Arc::clone(&store)));
        Self { store, sessions }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/flashcards/parse", post(routes::flashcards::parse))
        .route("/api/flashcards/patterns", get(routes::flashcards::patterns))
        .route(
            "/api/documents/{doc_id}/tree",
            put(routes::documents::submit_tree),
        )
        .route(
            "/api/documents/{doc_id}/session",
            get(routes::documents::session_status).delete(routes::documents::close_session),
        )
        .route(
            "/api/documents/{doc_id}/blocks",
            get(routes::documents::list_blocks),
        )
        .route(
            "/api/documents/{doc_id}/cards",
            get(routes::documents::list_cards),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        attribute = %config.sync.attribute_name,
        debounce_ms = config.sync.debounce_ms,
        "Block sync configured"
    );

    let state = AppState::new(config.sync.clone());
    let sessions = Arc::clone(&state.sessions);
    if let Some(max_idle) = config.session_idle() {
        tokio::spawn(evict_idle_sessions(Arc::clone(&sessions), max_idle));
    }

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let closed = sessions.close_all();
    tracing::info!(sessions = closed, "Flushed open sync sessions");

    Ok(())
}

async fn evict_idle_sessions(sessions: Arc<SessionRegistry>, max_idle: Duration) {
    let mut interval = tokio::time::interval(max_idle / 2);
    loop {
        interval.tick().await;
        let closed = sessions.close_idle(max_idle);
        if closed > 0 {
            tracing::info!(sessions = closed, "Evicted idle sync sessions");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health_check() -> &'static str {
    "OK"
}
