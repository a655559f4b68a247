//! The crawl engine.
//!
//! A discography scrapper builds one album scrapper per album link, which in
//! turn builds one track scrapper per track link. Every level shares the same
//! [`CrawlContext`], and the next level is built through an injected
//! [`ScrapperFactory`] so tests can substitute it.

mod album;
mod discography;
mod error;
mod track;

pub use album::AlbumScrapper;
pub use discography::DiscographyScrapper;
pub use error::ScrapeError;
pub use track::{TrackOutcome, TrackScrapper};

use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::catalog::TrackCatalog;
use crate::config::{Config, CrawlConfig};
use crate::parser::{HtmlParser, Parser};
use crate::persist::{LocalPersister, Persister};
use crate::retriever::{FetchError, HttpRetriever, Retriever};
use crate::site::UrlKind;

/// One crawl entry point.
#[async_trait]
pub trait Scrapper: Send + Sync {
    /// Crawl the page at `url` and everything below it.
    async fn execute(&self, url: &Url) -> Result<(), ScrapeError>;
}

/// Collaborators shared by every scrapper of a crawl.
#[derive(Clone)]
pub struct CrawlContext {
    pub retriever: Arc<dyn Retriever>,
    pub parser: Arc<dyn Parser>,
    pub persister: Arc<dyn Persister>,
    pub catalog: Arc<dyn TrackCatalog>,
    pub crawl: CrawlConfig,
}

impl CrawlContext {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        parser: Arc<dyn Parser>,
        persister: Arc<dyn Persister>,
        catalog: Arc<dyn TrackCatalog>,
    ) -> Self {
        Self {
            retriever,
            parser,
            persister,
            catalog,
            crawl: CrawlConfig::default(),
        }
    }

    /// Production collaborators: HTTP retrieval, html5ever parsing and a
    /// persister writing below `config.storage.base_folder`.
    pub fn from_config(
        config: &Config,
        catalog: Arc<dyn TrackCatalog>,
    ) -> Result<Self, FetchError> {
        let retriever = HttpRetriever::new(&config.retriever)?;
        Ok(Self::new(
            Arc::new(retriever),
            Arc::new(HtmlParser::new()),
            Arc::new(LocalPersister::new(&config.storage.base_folder)),
            catalog,
        )
        .with_crawl_config(config.crawl.clone()))
    }

    pub fn with_crawl_config(mut self, crawl: CrawlConfig) -> Self {
        self.crawl = crawl;
        self
    }
}

/// Builds the scrapper of the next level down.
pub type ScrapperFactory = Arc<dyn Fn(CrawlContext) -> Arc<dyn Scrapper> + Send + Sync>;

/// The scrapper handling a page of the given kind, if any.
pub fn scrapper_for(kind: UrlKind, ctx: CrawlContext) -> Option<Arc<dyn Scrapper>> {
    match kind {
        UrlKind::Track => Some(Arc::new(TrackScrapper::new(ctx))),
        UrlKind::Album => Some(Arc::new(AlbumScrapper::new(ctx))),
        UrlKind::Discography => Some(Arc::new(DiscographyScrapper::new(ctx))),
        UrlKind::Unknown => None,
    }
}

/// Retrieve and parse a page, then run `extract` on the tree.
///
/// The tree never outlives this call, which keeps callers' futures `Send`.
async fn fetch_page<T, F>(ctx: &CrawlContext, url: &Url, extract: F) -> Result<T, ScrapeError>
where
    F: FnOnce(&Html) -> Result<T, ScrapeError> + Send,
{
    let body = ctx.retriever.retrieve(url.as_str()).await?;
    let document = ctx.parser.parse(&body)?;
    extract(&document)
}

/// Resolve site-relative links against the page's scheme and host.
fn resolve_links(base: &Url, links: &[String]) -> Result<Vec<Url>, ScrapeError> {
    links
        .iter()
        .map(|link| {
            base.join(link).map_err(|e| ScrapeError::InvalidLink {
                base: base.to_string(),
                link: link.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}
