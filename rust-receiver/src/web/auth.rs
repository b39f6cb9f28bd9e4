//! Optional shared-token webhook authentication.
//!
//! When a token is configured, every webhook request must carry it in the
//! `X-Webhook-Token` header. The comparison is constant-time.

/// Header the sender puts the shared token in.
pub const AUTH_HEADER: &str = "x-webhook-token";

/// Check if shared-token authentication is enabled.
pub fn is_auth_enabled(token: &Option<String>) -> bool {
    token.as_ref().map(|t| !t.trim().is_empty()).unwrap_or(false)
}

/// Verify a provided token against the configured one.
pub fn verify_auth_token(expected: &str, provided: Option<&str>) -> bool {
    match provided {
        Some(provided) => constant_time_compare(expected, provided),
        None => false,
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
