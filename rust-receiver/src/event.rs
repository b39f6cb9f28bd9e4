//! Webhook event data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single webhook delivery after validation.
///
/// Events are write-once: they are created at receipt, classified
/// synchronously, and never updated or deleted.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Opaque unique identifier supplied by the sender.
    pub event_id: String,
    /// Timestamp captured at receipt.
    pub received_at: DateTime<Utc>,
    /// The validated payload object. Unknown fields are carried as-is.
    pub payload: Map<String, Value>,
}

impl WebhookEvent {
    /// Create an event stamped with the current time.
    pub fn new(event_id: String, payload: Map<String, Value>) -> Self {
        Self {
            event_id,
            received_at: Utc::now(),
            payload,
        }
    }
}

/// Classification of a webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Accepted,
    Duplicate,
    Rejected,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Accepted => "accepted",
            EventStatus::Duplicate => "duplicate",
            EventStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Extract the sender-supplied event identifier from a payload.
///
/// Only a non-empty JSON string counts; a missing key, empty string, or
/// non-string value is treated as absent.
pub fn extract_event_id(payload: &Map<String, Value>) -> Option<String> {
    match payload.get("event_id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
