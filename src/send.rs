//! Outbound message delivery.
//!
//! The webhook server replies through the [`MessageSender`] capability —
//! deliver a text response to a recipient identifier — so the retrieval
//! core never depends on any particular messaging transport.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::ServerConfig;

/// Capability to deliver a text reply to a recipient identifier.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Transport name for logs.
    fn name(&self) -> &str;
    /// Deliver `text` to the recipient identified by `to`.
    async fn send(&self, to: &str, text: &str) -> Result<()>;
}

/// Prints outbound messages to stdout. Local testing and dry runs.
pub struct ConsoleSender;

#[async_trait]
impl MessageSender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, to: &str, text: &str) -> Result<()> {
        println!("-> {}: {}", to, text);
        Ok(())
    }
}

/// WhatsApp Cloud API sender.
///
/// Calls `POST graph.facebook.com/v18.0/<phone_number_id>/messages`.
/// Credentials come from the environment: `META_TOKEN` (bearer token)
/// and `PHONE_NUMBER_ID`.
pub struct MetaSender {
    client: reqwest::Client,
    token: String,
    phone_number_id: String,
}

impl MetaSender {
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var("META_TOKEN").context("META_TOKEN environment variable not set")?;
        let phone_number_id = std::env::var("PHONE_NUMBER_ID")
            .context("PHONE_NUMBER_ID environment variable not set")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            token,
            phone_number_id,
        })
    }
}

#[async_trait]
impl MessageSender for MetaSender {
    fn name(&self) -> &str {
        "meta"
    }

    async fn send(&self, to: &str, text: &str) -> Result<()> {
        let url = format!(
            "https://graph.facebook.com/v18.0/{}/messages",
            self.phone_number_id
        );
        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": text },
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Meta send failed with {}: {}", status, body);
        }

        Ok(())
    }
}

/// Create the configured [`MessageSender`].
pub fn create_sender(config: &ServerConfig) -> Result<Box<dyn MessageSender>> {
    match config.sender.as_str() {
        "console" => Ok(Box::new(ConsoleSender)),
        "meta" => Ok(Box::new(MetaSender::from_env()?)),
        other => bail!("Unknown sender: '{}'. Use console or meta.", other),
    }
}
