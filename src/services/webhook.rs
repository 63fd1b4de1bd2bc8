// src/services/webhook.rs

//! Discord webhook delivery.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::WebhookPayload;
use crate::services::DeliverySink;

/// Posts notification payloads to a Discord webhook.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl DeliverySink for DiscordNotifier {
    async fn deliver(&self, payload: &WebhookPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if status >= 400 {
            return Err(AppError::Delivery { status, body });
        }

        log::info!("Discord responded with status {status}");
        log::debug!(
            "Discord response body: {}",
            if body.is_empty() { "<no body>" } else { &body }
        );
        Ok(())
    }
}
