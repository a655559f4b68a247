use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{
    fetch_page, resolve_links, AlbumScrapper, CrawlContext, ScrapeError, Scrapper, ScrapperFactory,
};
use crate::extract::{
    collect_links, filter_links, find_embedded_json, LinkKind, MANIFEST_ATTR, MANIFEST_TAG,
};
use crate::model::DiscographyItem;

/// Crawls every album of an artist's discography page.
pub struct DiscographyScrapper {
    ctx: CrawlContext,
    album_factory: ScrapperFactory,
}

impl DiscographyScrapper {
    pub fn new(ctx: CrawlContext) -> Self {
        Self {
            ctx,
            album_factory: Arc::new(|ctx: CrawlContext| -> Arc<dyn Scrapper> {
                Arc::new(AlbumScrapper::new(ctx))
            }),
        }
    }

    /// Replace how album scrappers are built.
    pub fn with_album_factory(mut self, factory: ScrapperFactory) -> Self {
        self.album_factory = factory;
        self
    }

    /// Album links of the discography page, deduplicated, in page order.
    ///
    /// The embedded manifest is preferred. Pages without one, or with an
    /// empty one, fall back to the album anchors in the markup.
    pub async fn album_links(&self, url: &Url) -> Result<Vec<String>, ScrapeError> {
        fetch_page(&self.ctx, url, |document| {
            let manifest: Vec<DiscographyItem> =
                find_embedded_json(document, MANIFEST_TAG, MANIFEST_ATTR)?.unwrap_or_default();

            let candidates = if manifest.is_empty() {
                debug!("No discography manifest, reading album anchors");
                collect_links(document, LinkKind::Album.needle())
            } else {
                manifest.into_iter().map(|item| item.page_url).collect()
            };
            Ok(filter_links(candidates, LinkKind::Album))
        })
        .await
    }
}

#[async_trait]
impl Scrapper for DiscographyScrapper {
    async fn execute(&self, url: &Url) -> Result<(), ScrapeError> {
        info!(url = %url, "Scraping discography");

        let links = self.album_links(url).await?;
        let albums = resolve_links(url, &links)?;
        info!(url = %url, albums = albums.len(), "Found albums");

        for album_url in &albums {
            let scrapper = (self.album_factory)(self.ctx.clone());
            scrapper.execute(album_url).await?;
        }
        Ok(())
    }
}
