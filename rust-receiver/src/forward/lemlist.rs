//! lemlist campaign API sink.
//!
//! lemlist authenticates with HTTP Basic auth using an empty username and
//! the API key as password. Leads land in a named campaign; the campaign id
//! is looked up by name once (created if absent) and cached for the life of
//! the process.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{ForwardError, ForwardOutcome, ForwardSink};
use crate::config::Config;
use crate::event::WebhookEvent;
use crate::lead::Lead;

/// Settings for the lemlist sink.
#[derive(Debug, Clone)]
pub struct LemlistConfig {
    /// API key used as the Basic auth password.
    pub api_key: String,
    /// Base URL of the lemlist API.
    pub base_url: String,
    /// Campaign that receives forwarded leads.
    pub campaign_name: String,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
}

impl LemlistConfig {
    /// Build sink settings from the application config.
    ///
    /// Returns `None` when no usable API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.lemlist_api_key.clone().filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            base_url: config.lemlist_base_url.clone(),
            campaign_name: config.campaign_name.clone(),
            timeout: Duration::from_millis(config.forward_timeout_ms),
        })
    }
}

/// Campaign record as returned by the lemlist API.
#[derive(Debug, Deserialize)]
struct Campaign {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
}

/// Forwards accepted events to a lemlist campaign.
pub struct LemlistSink {
    client: Client,
    api_key: String,
    base_url: String,
    campaign_name: String,
    campaign_id: RwLock<Option<String>>,
}

impl LemlistSink {
    /// Create a sink with a bounded-timeout HTTP client.
    pub fn new(config: LemlistConfig) -> Result<Self, ForwardError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            campaign_name: config.campaign_name,
            campaign_id: RwLock::new(None),
        })
    }

    /// Resolve the campaign id, creating the campaign if it does not exist.
    ///
    /// The id is cached after the first resolution; concurrent callers
    /// double-check under the write lock so the lookup runs at most once.
    pub async fn ensure_campaign(&self) -> Result<String, ForwardError> {
        {
            let cached = self.campaign_id.read().await;
            if let Some(id) = cached.as_ref() {
                return Ok(id.clone());
            }
        }

        let mut cached = self.campaign_id.write().await;

        // Double-check after acquiring write lock
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let url = format!("{}/api/campaigns", self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth("", Some(&self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ForwardError::Campaign(format!(
                "campaign list returned {}",
                response.status()
            )));
        }

        let campaigns: Vec<Campaign> = response.json().await?;

        if let Some(campaign) = campaigns.into_iter().find(|c| c.name == self.campaign_name) {
            info!(
                campaign_id = %campaign.id,
                campaign = %self.campaign_name,
                "lemlist_campaign_found"
            );
            *cached = Some(campaign.id.clone());
            return Ok(campaign.id);
        }

        info!(campaign = %self.campaign_name, "lemlist_campaign_creating");

        let response = self
            .client
            .post(&url)
            .basic_auth("", Some(&self.api_key))
            .json(&json!({ "name": self.campaign_name }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ForwardError::Campaign(format!(
                "campaign create returned {}",
                response.status()
            )));
        }

        let campaign: Campaign = response.json().await?;

        info!(
            campaign_id = %campaign.id,
            campaign = %self.campaign_name,
            "lemlist_campaign_created"
        );

        *cached = Some(campaign.id.clone());
        Ok(campaign.id)
    }
}

#[async_trait]
impl ForwardSink for LemlistSink {
    async fn forward(&self, event: &WebhookEvent) -> Result<ForwardOutcome, ForwardError> {
        let lead = Lead::from_payload(&event.payload);

        let Some(email) = lead.email.clone() else {
            warn!(event_id = %event.event_id, "lead_email_missing");
            return Ok(ForwardOutcome::Skipped {
                reason: "payload carries no email field".to_string(),
            });
        };

        let campaign_id = self.ensure_campaign().await?;

        let url = format!(
            "{}/api/campaigns/{}/leads/{}",
            self.base_url, campaign_id, email
        );

        let response = self
            .client
            .post(&url)
            .basic_auth("", Some(&self.api_key))
            .json(&lead)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                event_id = %event.event_id,
                email = %email,
                status = status.as_u16(),
                "lemlist_lead_rejected"
            );
            return Err(ForwardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            event_id = %event.event_id,
            email = %email,
            campaign_id = %campaign_id,
            "lemlist_lead_pushed"
        );

        Ok(ForwardOutcome::Delivered)
    }
}
