//! Page and asset retrieval.

mod http;

pub use http::HttpRetriever;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Failed to read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Fetches the raw bytes behind a URL with a single GET.
///
/// A non-success HTTP status is not an error at this layer.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
