//! Tree walks over a parsed document.
//!
//! Both walks visit nodes in depth-first pre-order (a node, then its
//! children left to right), which is document order.

use scraper::Html;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Element carrying the track metadata payload.
pub const TRALBUM_TAG: &str = "script";
pub const TRALBUM_ATTR: &str = "data-tralbum";

/// Element carrying the discography manifest.
pub const MANIFEST_TAG: &str = "ol";
pub const MANIFEST_ATTR: &str = "data-client-items";

/// An embedded payload was found but is not the expected JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to decode <{tag} {attr}> payload: {source}")]
    Json {
        tag: String,
        attr: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Every `<a href>` whose target contains `needle`, in document order.
///
/// Duplicates are kept; filtering happens later.
pub fn collect_links(document: &Html, needle: &str) -> Vec<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == "a")
        .filter_map(|element| element.attr("href"))
        .filter(|href| href.contains(needle))
        .map(str::to_string)
        .collect()
}

/// Decode the JSON held in `attr` of the first `tag` element carrying it.
///
/// The walk stops at the first such element: its payload either decodes or
/// fails the whole extraction. `Ok(None)` means no element matched.
pub fn find_embedded_json<T: DeserializeOwned>(
    document: &Html,
    tag: &str,
    attr: &str,
) -> Result<Option<T>, DecodeError> {
    let payload = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == tag)
        .find_map(|element| element.attr(attr));

    let Some(payload) = payload else {
        return Ok(None);
    };

    serde_json::from_str(payload)
        .map(Some)
        .map_err(|source| DecodeError::Json {
            tag: tag.to_string(),
            attr: attr.to_string(),
            source,
        })
}
