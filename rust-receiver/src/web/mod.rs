//! Web server module for handling inbound webhooks.
//!
//! This module provides a thin web server that:
//! - Receives RB2B visitor webhooks on `/rb2b-webhook`
//! - Validates and deduplicates them
//! - Forwards accepted events to the configured sink
//! - Acknowledges the sender regardless of the downstream outcome

pub mod auth;
pub mod handlers;

pub use handlers::{health, rb2b_webhook, ErrorResponse, HealthResponse, WebhookResponse};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dedup::DedupStore;
use crate::forward::ForwardSink;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dedup: DedupStore,
    pub sink: Arc<dyn ForwardSink>,
}

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn ForwardSink>) -> Self {
        let dedup = DedupStore::new(config.dedup_capacity);
        Self {
            config: Arc::new(config),
            dedup,
            sink,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/rb2b-webhook", post(handlers::rb2b_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
