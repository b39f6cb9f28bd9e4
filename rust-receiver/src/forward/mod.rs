//! Downstream forwarding of accepted webhook events.
//!
//! The receiver acknowledges the sender before the downstream outcome is
//! known (at-least-once acknowledgement), so forwarding is modeled as a
//! bounded-timeout operation whose failure is reported via an error value
//! and logged, never surfaced on the HTTP response.

pub mod lemlist;

pub use lemlist::{LemlistConfig, LemlistSink};

use async_trait::async_trait;
use thiserror::Error;

use crate::event::WebhookEvent;

/// What happened to an event the sink was asked to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The downstream accepted the event.
    Delivered,
    /// The sink declined the event; not an error.
    Skipped { reason: String },
}

/// Why a forward attempt failed.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The sink's campaign could not be resolved or created.
    #[error("campaign resolution failed: {0}")]
    Campaign(String),

    /// The downstream answered with a non-success status.
    #[error("downstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport-level failure, including the bounded request timeout.
    #[error("downstream request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// A downstream sink for accepted webhook events.
///
/// Injected into the web layer so tests can observe forwards without a
/// network; `LemlistSink` is the production implementation.
#[async_trait]
pub trait ForwardSink: Send + Sync {
    async fn forward(&self, event: &WebhookEvent) -> Result<ForwardOutcome, ForwardError>;
}
