use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use url::Url;

use super::{
    fetch_page, resolve_links, CrawlContext, ScrapeError, Scrapper, ScrapperFactory, TrackScrapper,
};
use crate::extract::{collect_links, filter_links, LinkKind};

/// Crawls every track linked from an album page.
pub struct AlbumScrapper {
    ctx: CrawlContext,
    track_factory: ScrapperFactory,
}

impl AlbumScrapper {
    pub fn new(ctx: CrawlContext) -> Self {
        Self {
            ctx,
            track_factory: Arc::new(|ctx: CrawlContext| -> Arc<dyn Scrapper> {
                Arc::new(TrackScrapper::new(ctx))
            }),
        }
    }

    /// Replace how track scrappers are built.
    pub fn with_track_factory(mut self, factory: ScrapperFactory) -> Self {
        self.track_factory = factory;
        self
    }

    /// Track links of the album page, deduplicated, in page order.
    pub async fn track_links(&self, url: &Url) -> Result<Vec<String>, ScrapeError> {
        fetch_page(&self.ctx, url, |document| {
            let candidates = collect_links(document, LinkKind::Track.needle());
            Ok(filter_links(candidates, LinkKind::Track))
        })
        .await
    }

    async fn run_sequential(&self, tracks: &[Url]) -> Result<(), ScrapeError> {
        for track_url in tracks {
            let scrapper = (self.track_factory)(self.ctx.clone());
            scrapper.execute(track_url).await?;
        }
        Ok(())
    }

    /// Crawl up to `limit` tracks at once. Every track runs to completion;
    /// the first failure in link order is returned.
    async fn run_concurrent(&self, tracks: &[Url], limit: usize) -> Result<(), ScrapeError> {
        let results: Vec<Result<(), ScrapeError>> = stream::iter(tracks.iter().cloned())
            .map(|track_url: Url| {
                let scrapper = (self.track_factory)(self.ctx.clone());
                async move { scrapper.execute(&track_url).await }
            })
            .buffered(limit)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, total = tracks.len(), "Some tracks failed");
        }
        results.into_iter().collect()
    }
}

#[async_trait]
impl Scrapper for AlbumScrapper {
    async fn execute(&self, url: &Url) -> Result<(), ScrapeError> {
        info!(url = %url, "Scraping album");

        let links = self.track_links(url).await?;
        let tracks = resolve_links(url, &links)?;
        info!(url = %url, tracks = tracks.len(), "Found tracks");

        match self.ctx.crawl.max_concurrent_tracks {
            0 | 1 => self.run_sequential(&tracks).await,
            limit => self.run_concurrent(&tracks, limit).await,
        }
    }
}
