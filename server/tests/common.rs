//! Common utilities for integration tests

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::Router;
use server::config::ServerConfig;
use server::routes::{build_router, AppState};
use speech_core::{SpeechClient, DEFAULT_MODEL};

/// Create a test app instance.
///
/// Uses the real router with a dummy API key. Tests only exercise paths
/// that fail validation before any network call is made.
pub fn create_test_app() -> Router {
    let speech = Arc::new(SpeechClient::new(
        "test-key-for-integration-tests",
        DEFAULT_MODEL,
    ));

    let state = AppState {
        speech,
        request_count: Arc::new(AtomicU64::new(0)),
        config: ServerConfig::default(),
    };

    build_router(state)
}
