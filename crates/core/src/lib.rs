pub mod catalog;
pub mod config;
pub mod extract;
pub mod model;
pub mod parser;
pub mod persist;
pub mod retriever;
pub mod scrapper;
pub mod site;
pub mod testing;

pub use catalog::{CatalogError, InMemoryCatalog, Reservation, TrackCatalog};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, load_config_or_default,
    validate_config, Config, ConfigError, CrawlConfig,
};
pub use model::{DiscographyItem, TrAlbum, Track};
pub use parser::{HtmlParser, ParseError, Parser};
pub use persist::{LocalPersister, Persister, SaveError};
pub use retriever::{FetchError, HttpRetriever, Retriever};
pub use scrapper::{
    scrapper_for, AlbumScrapper, CrawlContext, DiscographyScrapper, ScrapeError, Scrapper,
    ScrapperFactory, TrackOutcome, TrackScrapper,
};
pub use site::{ArtistPage, SiteUrl, UrlError, UrlKind};
