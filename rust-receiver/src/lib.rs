//! LeadGate - webhook receiver for RB2B visitor identification events.
//!
//! This library backs the `leadgate-web` binary, a thin HTTP service that:
//! - Receives visitor webhooks on `POST /rb2b-webhook`
//! - Validates and deduplicates them by `event_id`
//! - Forwards accepted events as leads to the lemlist campaign API
//!
//! ## Architecture
//!
//! ```text
//! RB2B → Web Server → dedup store → ForwardSink (lemlist) → 200 OK
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod event;
pub mod forward;
pub mod lead;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use dedup::{DedupOutcome, DedupStore};
pub use error::WebhookError;
pub use event::{EventStatus, WebhookEvent};
pub use forward::{ForwardError, ForwardOutcome, ForwardSink, LemlistSink};
pub use lead::Lead;
pub use web::AppState;
