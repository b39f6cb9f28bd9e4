//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables, matching the Python implementation.

use std::env;

use tracing::warn;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// lemlist API key (Basic auth password, empty username)
    pub lemlist_api_key: Option<String>,

    /// Base URL of the lemlist API
    pub lemlist_base_url: String,

    /// Name of the lemlist campaign that receives leads
    pub campaign_name: String,

    /// Timeout in milliseconds for downstream forward requests
    pub forward_timeout_ms: u64,

    /// Maximum number of event ids retained for deduplication
    pub dedup_capacity: usize,

    /// Optional shared token for webhook authentication
    pub webhook_auth_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),

            lemlist_api_key: env::var("LEMLIST_API_KEY").ok(),

            lemlist_base_url: parse_base_url("LEMLIST_BASE_URL", "https://api.lemlist.com"),

            campaign_name: env::var("LEMLIST_CAMPAIGN_NAME")
                .unwrap_or_else(|_| "website_leads".to_string()),

            forward_timeout_ms: env::var("FORWARD_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),

            dedup_capacity: env::var("DEDUP_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            webhook_auth_token: env::var("WEBHOOK_AUTH_TOKEN").ok(),
        }
    }
}

/// Parse an absolute base URL from the environment, trimming any trailing slash.
fn parse_base_url(name: &str, default: &str) -> String {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default.to_string(),
    };

    match Url::parse(&raw) {
        Ok(_) => raw.trim_end_matches('/').to_string(),
        Err(e) => {
            warn!(env_var = name, value = %raw, error = %e, "Invalid base URL, using default");
            default.to_string()
        }
    }
}
