//! Common test utilities and fixtures for integration tests.
//!
//! Every context gets a fresh in-memory store, so tests need no external services.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use block_sync::SyncConfig;

use flashcard_blocks_backend::db::BlockStore;
use flashcard_blocks_backend::{build_router, AppState};

/// Debounce used by tests that wait for the timer.
pub const TEST_DEBOUNCE_MS: u64 = 50;

/// Test context holding the app state and router.
pub struct TestContext {
    pub store: Arc<BlockStore>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(SyncConfig {
            debounce_ms: TEST_DEBOUNCE_MS,
            ..SyncConfig::default()
        })
    }

    pub fn with_config(config: SyncConfig) -> Self {
        let state = AppState::new(config);
        let store = Arc::clone(&state.store);
        Self {
            store,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Wait comfortably past the test debounce interval.
pub async fn wait_for_flush() {
    tokio::time::sleep(std::time::Duration::from_millis(TEST_DEBOUNCE_MS * 10)).await;
}
