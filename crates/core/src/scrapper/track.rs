use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{fetch_page, CrawlContext, ScrapeError, Scrapper};
use crate::catalog::{Reservation, TrackCatalog};
use crate::extract::{find_embedded_json, TRALBUM_ATTR, TRALBUM_TAG};
use crate::model::TrAlbum;

/// What a single track crawl ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The track was fetched and saved at `path` (relative to the root).
    Downloaded { path: String },
    /// The catalog already had `path`; nothing was fetched.
    AlreadyPresent { path: String },
    /// Another crawl is currently downloading `path`.
    InProgress { path: String },
    /// The page carries no download URL.
    NotDownloadable { path: String },
    /// The page has no track metadata.
    NoMetadata,
}

/// Downloads the single track behind a track page.
pub struct TrackScrapper {
    ctx: CrawlContext,
}

impl TrackScrapper {
    pub fn new(ctx: CrawlContext) -> Self {
        Self { ctx }
    }

    /// Crawl one track page and report what happened to it.
    pub async fn scrape(&self, url: &Url) -> Result<TrackOutcome, ScrapeError> {
        info!(url = %url, "Scraping track");

        let tralbum: Option<TrAlbum> = fetch_page(&self.ctx, url, |document| {
            Ok(find_embedded_json(document, TRALBUM_TAG, TRALBUM_ATTR)?)
        })
        .await?;

        let Some(tralbum) = tralbum else {
            debug!(url = %url, "No track metadata on page");
            return Ok(TrackOutcome::NoMetadata);
        };

        let track = tralbum.into_track();
        let path = track.relative_path();

        let guard = match ReservationGuard::acquire(&self.ctx.catalog, &path) {
            Ok(guard) => guard,
            Err(Reservation::InFlight) => {
                debug!(path = %path, "Track is being downloaded elsewhere");
                return Ok(TrackOutcome::InProgress { path });
            }
            Err(_) => {
                debug!(path = %path, "Track already in catalog");
                return Ok(TrackOutcome::AlreadyPresent { path });
            }
        };

        let Some(download_url) = track.download_url.as_deref() else {
            debug!(path = %path, "Track has no download URL");
            return Ok(TrackOutcome::NotDownloadable { path });
        };

        let data = self.ctx.retriever.retrieve(download_url).await?;
        self.ctx.persister.save(&data, &track).await?;
        guard.commit();

        info!(path = %path, "Downloaded track");
        Ok(TrackOutcome::Downloaded { path })
    }
}

#[async_trait]
impl Scrapper for TrackScrapper {
    async fn execute(&self, url: &Url) -> Result<(), ScrapeError> {
        self.scrape(url).await.map(|_| ())
    }
}

/// Holds a catalog claim on a path, released on drop unless committed.
struct ReservationGuard {
    catalog: Arc<dyn TrackCatalog>,
    path: String,
    committed: bool,
}

impl ReservationGuard {
    fn acquire(catalog: &Arc<dyn TrackCatalog>, path: &str) -> Result<Self, Reservation> {
        match catalog.try_reserve(path) {
            Reservation::Reserved => Ok(Self {
                catalog: Arc::clone(catalog),
                path: path.to_string(),
                committed: false,
            }),
            other => Err(other),
        }
    }

    fn commit(mut self) {
        self.catalog.update(&self.path);
        self.committed = true;
    }
}

impl Drop for ReservationGuard {
    fn drop(&mut self) {
        if !self.committed {
            self.catalog.release(&self.path);
        }
    }
}
