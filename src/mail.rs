use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Best-effort notification sender. Callers discard failures by policy:
/// a lost notification must never block or roll back a credential
/// operation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn notify_signup(&self, email: &str) -> anyhow::Result<()>;
    async fn notify_reset(&self, email: &str) -> anyhow::Result<()>;
}

/// Posts notification requests as JSON to an HTTP mail relay.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(endpoint: &str, sender: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            sender: sender.to_string(),
        }
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "from": self.sender,
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await
            .context("mail relay request")?;
        response.error_for_status().context("mail relay response")?;
        debug!(%to, %subject, "notification sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn notify_signup(&self, email: &str) -> anyhow::Result<()> {
        self.send(email, "Welcome", "Your account has been created.")
            .await
    }

    async fn notify_reset(&self, email: &str) -> anyhow::Result<()> {
        self.send(email, "Password reset", "Your password has been changed.")
            .await
    }
}

/// Used when no relay endpoint is configured; notifications go nowhere.
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn notify_signup(&self, email: &str) -> anyhow::Result<()> {
        debug!(%email, "mail relay not configured, dropping signup notification");
        Ok(())
    }

    async fn notify_reset(&self, email: &str) -> anyhow::Result<()> {
        debug!(%email, "mail relay not configured, dropping reset notification");
        Ok(())
    }
}
