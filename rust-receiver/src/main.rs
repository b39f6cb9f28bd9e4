//! LeadGate Web Server - RB2B webhook receiver.
//!
//! This binary provides a small web server that:
//! - Receives visitor webhooks from RB2B
//! - Validates and deduplicates them by event id
//! - Forwards accepted events as leads to a lemlist campaign
//! - Acknowledges the sender regardless of the downstream outcome
//!
//! The lemlist campaign is resolved (and created if missing) before the
//! listener binds; a misconfigured API key fails the process at startup
//! instead of on the first delivery.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadgate::forward::{LemlistConfig, LemlistSink};
use leadgate::web::{router, AppState};
use leadgate::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("receiver_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        campaign = %config.campaign_name,
        dedup_capacity = config.dedup_capacity,
        forward_timeout_ms = config.forward_timeout_ms,
        auth_configured = config.webhook_auth_token.is_some(),
        api_key_configured = config.lemlist_api_key.is_some(),
        "config_loaded"
    );

    // Create the lemlist sink
    let lemlist =
        LemlistConfig::from_config(&config).context("LEMLIST_API_KEY must be set")?;
    let sink = LemlistSink::new(lemlist).context("Failed to create lemlist client")?;

    // Resolve the campaign before accepting traffic
    let campaign_id = sink
        .ensure_campaign()
        .await
        .context("Failed to resolve lemlist campaign")?;
    info!(
        campaign_id = %campaign_id,
        campaign = %config.campaign_name,
        "campaign_ready"
    );

    // Create application state and router
    let port = config.port;
    let state = AppState::new(config, Arc::new(sink));
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "receiver_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("receiver_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("receiver_shutting_down");
}
