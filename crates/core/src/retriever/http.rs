//! reqwest-backed retriever.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{FetchError, Retriever};
use crate::config::RetrieverConfig;

/// Retriever doing plain GET requests.
pub struct HttpRetriever {
    client: Client,
}

impl HttpRetriever {
    /// Create a retriever from configuration.
    pub fn new(config: &RetrieverConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn retrieve(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url = url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = %status, "Non-success status, using body anyway");
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url = url, bytes = body.len(), "Retrieved");
        Ok(body.to_vec())
    }
}
