//! Site URL parsing, validation and classification.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Errors raised while turning caller input into a [`SiteUrl`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Malformed URL {input:?}: {reason}")]
    Malformed { input: String, reason: String },

    #[error("URL host {host:?} does not belong to {domain}")]
    WrongDomain { host: String, domain: String },
}

/// What a site URL points at, decided by its first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    Track,
    Album,
    Discography,
    Unknown,
}

impl UrlKind {
    /// Classify a URL path. Only the first segment counts and it must match exactly.
    pub fn from_path(path: &str) -> Self {
        let path = path.strip_prefix('/').unwrap_or(path);
        let segment = path.split('/').next().unwrap_or_default();
        match segment {
            "track" => UrlKind::Track,
            "album" => UrlKind::Album,
            "music" => UrlKind::Discography,
            _ => UrlKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Track => "track",
            UrlKind::Album => "album",
            UrlKind::Discography => "discography",
            UrlKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page of an artist's site, used to build URLs from route parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistPage<'a> {
    Discography,
    Album(&'a str),
    Track(&'a str),
}

/// A parsed URL on the target site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    raw: String,
    url: Url,
    domain: String,
}

impl SiteUrl {
    /// Parse raw input. Parser failures are surfaced as [`UrlError::Malformed`].
    pub fn parse(raw: &str, domain: &str) -> Result<Self, UrlError> {
        let url = Url::parse(raw).map_err(|e| UrlError::Malformed {
            input: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            url,
            domain: domain.to_string(),
        })
    }

    /// Parse and validate in one step.
    pub fn parse_validated(raw: &str, domain: &str) -> Result<Self, UrlError> {
        let site_url = Self::parse(raw, domain)?;
        site_url.validate()?;
        Ok(site_url)
    }

    /// Build the URL of one of an artist's pages, e.g. `https://{artist}.{domain}/music`.
    pub fn for_artist(artist: &str, page: ArtistPage<'_>, domain: &str) -> Result<Self, UrlError> {
        let raw = match page {
            ArtistPage::Discography => format!("https://{}.{}/music", artist, domain),
            ArtistPage::Album(album) => format!("https://{}.{}/album/{}", artist, domain, album),
            ArtistPage::Track(track) => format!("https://{}.{}/track/{}", artist, domain, track),
        };
        Self::parse_validated(&raw, domain)
    }

    /// Reject any host that is not the site domain or one of its subdomains.
    pub fn validate(&self) -> Result<(), UrlError> {
        let host = self.url.host_str().unwrap_or_default();
        let domain = self.domain.as_str();
        let on_domain = !domain.is_empty()
            && (host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.')));

        if on_domain {
            Ok(())
        } else {
            Err(UrlError::WrongDomain {
                host: host.to_string(),
                domain: self.domain.clone(),
            })
        }
    }

    pub fn classify(&self) -> UrlKind {
        UrlKind::from_path(self.url.path())
    }

    /// True for the exact shapes the site serves:
    /// `https://{artist}.{domain}/music`, `/album/{slug}` and `/track/{slug}`.
    pub fn is_canonical(&self) -> bool {
        if self.url.scheme() != "https"
            || self.url.query().is_some()
            || self.url.fragment().is_some()
        {
            return false;
        }

        let host = self.url.host_str().unwrap_or_default();
        let artist = match host
            .strip_suffix(self.domain.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'))
        {
            Some(artist) => artist,
            None => return false,
        };
        if artist.is_empty() || artist.contains('.') {
            return false;
        }

        let segments: Vec<&str> = self.url.path().trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["music"] => true,
            ["album", slug] | ["track", slug] => !slug.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
