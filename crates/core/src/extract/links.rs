//! Strict filtering of extracted link candidates.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;

static TRACK_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/track/[a-z0-9-]+$").unwrap());
static ALBUM_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/album/[a-z0-9-]+$").unwrap());

/// Which page type a link list targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Track,
    Album,
}

impl LinkKind {
    /// Substring an `href` must contain to be a candidate.
    pub fn needle(&self) -> &'static str {
        match self {
            LinkKind::Track => "track",
            LinkKind::Album => "album",
        }
    }

    /// Whether `path` is exactly `/<kind>/<slug>` with a lowercase slug.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            LinkKind::Track => TRACK_PATH.is_match(path),
            LinkKind::Album => ALBUM_PATH.is_match(path),
        }
    }
}

/// Keep only same-site relative paths of the given kind, first occurrence wins.
///
/// Absolute URLs (including other artists' albums), query strings and
/// fragments never match, so they are dropped.
pub fn filter_links<I, S>(candidates: I, kind: LinkKind) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            (kind.matches(candidate) && seen.insert(candidate.to_string()))
                .then(|| candidate.to_string())
        })
        .collect()
}
