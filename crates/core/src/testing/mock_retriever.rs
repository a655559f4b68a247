//! Mock retriever for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::retriever::{FetchError, Retriever};

/// Mock implementation of the Retriever trait.
///
/// Serves canned bodies keyed by exact URL and records every request.
/// URLs with no configured body fail like an unreachable host.
///
/// # Example
///
/// ```rust,ignore
/// use tapedeck_core::testing::MockRetriever;
///
/// let retriever = MockRetriever::new();
/// retriever.set_page("https://a.bandcamp.com/track/x", "<html>...</html>");
/// retriever.set_failure("https://cdn.example/x.mp3", "timeout");
/// ```
#[derive(Debug, Default)]
pub struct MockRetriever {
    /// Bodies by URL.
    pages: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Failure reasons by URL; these win over pages.
    failures: Arc<RwLock<HashMap<String, String>>>,
    /// Every requested URL, in order.
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn set_page(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), body.into());
    }

    /// Fail every request for `url`.
    pub fn set_failure(&self, url: &str, reason: &str) {
        self.failures
            .write()
            .unwrap()
            .insert(url.to_string(), reason.to_string());
    }

    /// All requested URLs, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// How many times `url` was requested.
    pub fn call_count(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn retrieve(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(reason) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Request {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Request {
                url: url.to_string(),
                reason: "no mock response configured".to_string(),
            })
    }
}
