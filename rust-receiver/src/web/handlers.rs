//! Webhook endpoint handlers.
//!
//! The webhook handler validates explicitly from the raw body rather than
//! through an extractor, so every rejection maps to exactly one error code:
//! 1. Shared-token auth (when configured)
//! 2. Content type must indicate JSON
//! 3. Body must parse into a JSON object
//! 4. The object must carry a non-empty string `event_id`
//!
//! Accepted events are recorded for deduplication before forwarding, so a
//! downstream failure never causes a replayed delivery to be re-forwarded.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::dedup::DedupOutcome;
use crate::error::WebhookError;
use crate::event::{extract_event_id, EventStatus, WebhookEvent};
use crate::forward::ForwardOutcome;
use crate::web::auth::{is_auth_enabled, verify_auth_token, AUTH_HEADER};
use crate::web::AppState;

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// RB2B Webhook
// =============================================================================

/// Acknowledgement returned for accepted and duplicate deliveries.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// Rejection body; `error` is a stable code from the taxonomy.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// RB2B webhook endpoint.
///
/// Returns 200 with `status: accepted` or `status: duplicate`; validation
/// failures return 400 (401 for auth) with an error code and cause no side
/// effects.
pub async fn rb2b_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    info!(
        content_length = body.len(),
        content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none"),
        "webhook_received"
    );

    // Verify shared token if configured
    if is_auth_enabled(&state.config.webhook_auth_token) {
        let expected = state.config.webhook_auth_token.as_deref().unwrap_or("");
        let provided = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());
        if !verify_auth_token(expected, provided) {
            return reject(&WebhookError::Unauthorized);
        }
    }

    if !is_json_content_type(&headers) {
        return reject(&WebhookError::InvalidContentType);
    }

    let payload: Map<String, Value> = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => return reject(&WebhookError::MalformedPayload),
    };

    let Some(event_id) = extract_event_id(&payload) else {
        return reject(&WebhookError::MissingEventId);
    };

    let event = WebhookEvent::new(event_id, payload);

    // Atomic check-and-insert: replayed deliveries stop here.
    if let DedupOutcome::AlreadySeen { first_seen } =
        state.dedup.check_and_insert(&event.event_id, event.received_at)
    {
        info!(
            event_id = %event.event_id,
            first_seen = %first_seen,
            status = %EventStatus::Duplicate,
            "webhook_duplicate"
        );
        return acknowledge(EventStatus::Duplicate, event.event_id);
    }

    info!(
        event_id = %event.event_id,
        status = %EventStatus::Accepted,
        "event_accepted"
    );

    // The event is already recorded; the downstream outcome is logged but
    // never changes the acknowledgement.
    match state.sink.forward(&event).await {
        Ok(ForwardOutcome::Delivered) => {
            info!(event_id = %event.event_id, "forward_delivered");
        }
        Ok(ForwardOutcome::Skipped { reason }) => {
            warn!(event_id = %event.event_id, reason = %reason, "forward_skipped");
        }
        Err(e) => {
            error!(event_id = %event.event_id, error = %e, "forward_failed");
        }
    }

    acknowledge(EventStatus::Accepted, event.event_id)
}

fn acknowledge(status: EventStatus, event_id: String) -> Response {
    (
        StatusCode::OK,
        Json(WebhookResponse {
            status,
            event_id: Some(event_id),
        }),
    )
        .into_response()
}

fn reject(error: &WebhookError) -> Response {
    warn!(
        code = error.code(),
        status = %EventStatus::Rejected,
        reason = %error,
        "webhook_rejected"
    );
    (error.status(), Json(ErrorResponse { error: error.code() })).into_response()
}

/// Accept `application/json` (with optional parameters) and `+json` suffixes.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}
