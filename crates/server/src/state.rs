use std::sync::Arc;

use tapedeck_core::{
    AlbumScrapper, CrawlContext, DiscographyScrapper, Scrapper, TrackScrapper, UrlKind,
};

/// Shared application state
pub struct AppState {
    domain: String,
    discography: Arc<dyn Scrapper>,
    album: Arc<dyn Scrapper>,
    track: Arc<dyn Scrapper>,
}

impl AppState {
    pub fn new(
        domain: impl Into<String>,
        discography: Arc<dyn Scrapper>,
        album: Arc<dyn Scrapper>,
        track: Arc<dyn Scrapper>,
    ) -> Self {
        Self {
            domain: domain.into(),
            discography,
            album,
            track,
        }
    }

    /// State with the production scrappers, all sharing `ctx`.
    pub fn from_context(domain: impl Into<String>, ctx: CrawlContext) -> Self {
        Self::new(
            domain,
            Arc::new(DiscographyScrapper::new(ctx.clone())),
            Arc::new(AlbumScrapper::new(ctx.clone())),
            Arc::new(TrackScrapper::new(ctx)),
        )
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The scrapper for a page kind; `None` for unknown pages.
    pub fn scrapper(&self, kind: UrlKind) -> Option<&Arc<dyn Scrapper>> {
        match kind {
            UrlKind::Discography => Some(&self.discography),
            UrlKind::Album => Some(&self.album),
            UrlKind::Track => Some(&self.track),
            UrlKind::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapedeck_core::testing::{MockPersister, MockRetriever};
    use tapedeck_core::{HtmlParser, InMemoryCatalog};

    #[test]
    fn test_unknown_kind_has_no_scrapper() {
        let ctx = CrawlContext::new(
            Arc::new(MockRetriever::new()),
            Arc::new(HtmlParser::new()),
            Arc::new(MockPersister::new()),
            Arc::new(InMemoryCatalog::empty()),
        );
        let state = AppState::from_context("bandcamp.com", ctx);

        assert_eq!(state.domain(), "bandcamp.com");
        assert!(state.scrapper(UrlKind::Unknown).is_none());
        assert!(state.scrapper(UrlKind::Track).is_some());
    }
}
