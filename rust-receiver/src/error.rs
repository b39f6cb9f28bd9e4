//! Request-scoped error taxonomy for the webhook endpoint.
//!
//! Every error here is scoped to a single request; none of them terminate
//! the process. Downstream forwarding failures are not part of this taxonomy
//! because they never alter the HTTP response (see `forward::ForwardError`).

use axum::http::StatusCode;
use thiserror::Error;

/// Reasons a webhook request is rejected before any side effect occurs.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Content type does not indicate JSON.
    #[error("content type must be application/json")]
    InvalidContentType,

    /// Body is missing, not valid JSON, or not a JSON object.
    #[error("request body is not a JSON object")]
    MalformedPayload,

    /// Payload carries no usable `event_id` field.
    #[error("payload is missing an event_id")]
    MissingEventId,

    /// Shared-token authentication is enabled and the token did not match.
    #[error("invalid or missing webhook token")]
    Unauthorized,
}

impl WebhookError {
    /// Stable snake_case code reported in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::InvalidContentType => "invalid_content_type",
            WebhookError::MalformedPayload => "malformed_payload",
            WebhookError::MissingEventId => "missing_event_id",
            WebhookError::Unauthorized => "unauthorized",
        }
    }

    /// HTTP status code the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
