//! HTTP client for the GitFeed API

use async_trait::async_trait;
use thiserror::Error;

use crate::event::EventRecord;
use crate::poller::EventSource;

/// Errors from fetching the event listing
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// HTTP client for communicating with the GitFeed API
#[derive(Clone)]
pub struct FeedApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedApiClient {
    /// Create a client from environment variables
    ///
    /// GITFEED_API_URL: base URL of the API (default http://localhost:5000)
    pub fn from_env() -> Self {
        let base_url = std::env::var("GITFEED_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());

        Self::new(&base_url)
    }

    /// Create a client with an explicit base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full event listing
    pub async fn get_events(&self) -> Result<Vec<EventRecord>, FeedError> {
        let url = format!("{}/api/events", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<EventRecord>>()
            .await
            .map_err(|e| FeedError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl EventSource for FeedApiClient {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError> {
        self.get_events().await
    }
}
