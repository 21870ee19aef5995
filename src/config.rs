use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub endpoint: Option<String>,
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let mail = MailConfig {
            endpoint: std::env::var("MAIL_ENDPOINT").ok(),
            sender: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@authgate.local".into()),
        };
        Ok(Self { database_url, mail })
    }
}
