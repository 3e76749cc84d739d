use std::env;

#[derive(Clone)]
pub struct Config {
    /// Path of the SQLite event store
    pub database_path: String,
    /// Webhook secret for verifying GitHub webhooks (HMAC-SHA256)
    pub webhook_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "gitfeed.db".to_string()),
            webhook_secret: env::var("WEBHOOK_SECRET").ok(),
        }
    }
}
