//! Mock scrapper for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::retriever::FetchError;
use crate::scrapper::{CrawlContext, ScrapeError, Scrapper, ScrapperFactory};

/// Mock implementation of the Scrapper trait.
///
/// Records every executed URL. URLs registered with [`MockScrapper::fail_on`]
/// fail with a fetch error carrying the given reason.
#[derive(Debug, Default)]
pub struct MockScrapper {
    executed: Arc<RwLock<Vec<String>>>,
    failures: Arc<RwLock<HashMap<String, String>>>,
}

impl MockScrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory that hands out this same mock for every page.
    pub fn factory(mock: &Arc<Self>) -> ScrapperFactory {
        let mock = Arc::clone(mock);
        Arc::new(move |_: CrawlContext| -> Arc<dyn Scrapper> { mock.clone() })
    }

    pub fn fail_on(&self, url: &str, reason: &str) {
        self.failures
            .write()
            .unwrap()
            .insert(url.to_string(), reason.to_string());
    }

    /// Executed URLs, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.read().unwrap().clone()
    }
}

#[async_trait]
impl Scrapper for MockScrapper {
    async fn execute(&self, url: &Url) -> Result<(), ScrapeError> {
        self.executed.write().unwrap().push(url.to_string());

        match self.failures.read().unwrap().get(url.as_str()) {
            Some(reason) => Err(ScrapeError::Fetch(FetchError::Request {
                url: url.to_string(),
                reason: reason.clone(),
            })),
            None => Ok(()),
        }
    }
}
