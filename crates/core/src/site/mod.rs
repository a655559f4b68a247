//! Target-site URLs: parsing, domain validation and page classification.

mod site_url;

pub use site_url::{ArtistPage, SiteUrl, UrlError, UrlKind};
