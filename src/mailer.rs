use anyhow::Context;
use axum::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::config::MailConfig;

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transactional email delivery. Failures are the caller's problem: the
/// registration flow swallows them, the OTP flows propagate them.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

/// Local dev mailer that logs the message instead of delivering it.
#[derive(Clone, Debug)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "mail send stub"
        );
        Ok(())
    }
}

/// Delivers through the relay's HTTP API (Brevo-compatible payload shape).
#[derive(Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

impl RelayMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let payload = json!({
            "sender": { "email": self.sender_email, "name": self.sender_name },
            "to": [{ "email": message.to }],
            "subject": message.subject,
            "textContent": message.body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .context("mail relay request")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("mail relay returned {status}: {detail}");
        }

        debug!(to = %message.to, subject = %message.subject, "mail sent");
        Ok(())
    }
}
