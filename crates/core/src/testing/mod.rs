//! Testing utilities and mock implementations.
//!
//! Mocks stand in for the network and disk collaborators of a crawl so the
//! scrappers can be exercised without real infrastructure. `fixtures` builds
//! pages shaped like the site's markup.
//!
//! # Example
//!
//! ```rust,ignore
//! use tapedeck_core::testing::{fixtures, MockPersister, MockRetriever};
//!
//! let retriever = MockRetriever::new();
//! retriever.set_page(
//!     "https://artist.bandcamp.com/album/record",
//!     fixtures::album_page(&["/track/one", "/track/two"]),
//! );
//! let persister = MockPersister::new();
//!
//! // Build a CrawlContext from them...
//! ```

mod mock_persister;
mod mock_retriever;
mod mock_scrapper;

pub use mock_persister::MockPersister;
pub use mock_retriever::MockRetriever;
pub use mock_scrapper::MockScrapper;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::json;

    /// Escape text for use inside a double-quoted attribute.
    pub fn escape_attr(value: &str) -> String {
        value
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// A `data-tralbum` payload for one track.
    pub fn tralbum_json(
        artist: &str,
        album_slug: Option<&str>,
        title: &str,
        track_number: u32,
        download_url: Option<&str>,
    ) -> String {
        let file = download_url.map(|url| json!({ "mp3-128": url }));
        json!({
            "artist": artist,
            "album_url": album_slug.map(|slug| format!("/album/{}", slug)),
            "url": format!(
                "https://{}.bandcamp.com/track/{}",
                artist.to_lowercase().replace(' ', ""),
                title.to_lowercase().replace(' ', "-")
            ),
            "current": { "title": title, "track_number": track_number },
            "trackinfo": [{ "title": title, "track_num": track_number, "file": file }],
        })
        .to_string()
    }

    /// A track page embedding `tralbum` the way the site does.
    pub fn track_page(tralbum: &str) -> String {
        format!(
            "<html><head><script src=\"/player.js\" data-tralbum=\"{}\"></script></head>\
             <body><h2 class=\"trackTitle\">track</h2></body></html>",
            escape_attr(tralbum)
        )
    }

    /// An album page listing `links` as anchors.
    pub fn album_page(links: &[&str]) -> String {
        let rows: String = links
            .iter()
            .map(|link| format!("<tr><td><a href=\"{}\">track</a></td></tr>", escape_attr(link)))
            .collect();
        format!("<html><body><table id=\"track_table\">{}</table></body></html>", rows)
    }

    /// A discography page. An empty `manifest` leaves the manifest out.
    pub fn discography_page(manifest: &[&str], anchors: &[&str]) -> String {
        if manifest.is_empty() {
            music_grid("", anchors)
        } else {
            discography_page_with_manifest(manifest, anchors)
        }
    }

    /// A discography page that always carries the manifest attribute, even
    /// when `manifest` is empty (`data-client-items="[]"`).
    pub fn discography_page_with_manifest(manifest: &[&str], anchors: &[&str]) -> String {
        let items: Vec<_> = manifest
            .iter()
            .enumerate()
            .map(|(i, page_url)| {
                json!({
                    "page_url": page_url,
                    "title": format!("Album {}", i + 1),
                    "type": "album",
                    "id": i,
                })
            })
            .collect();
        let manifest_attr = format!(
            " data-client-items=\"{}\"",
            escape_attr(&serde_json::Value::from(items).to_string())
        );
        music_grid(&manifest_attr, anchors)
    }

    fn music_grid(manifest_attr: &str, anchors: &[&str]) -> String {
        let items: String = anchors
            .iter()
            .map(|href| format!("<li><a href=\"{}\">album</a></li>", escape_attr(href)))
            .collect();
        format!(
            "<html><body><ol id=\"music-grid\"{}>{}</ol></body></html>",
            manifest_attr, items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use crate::extract::{
        find_embedded_json, MANIFEST_ATTR, MANIFEST_TAG, TRALBUM_ATTR, TRALBUM_TAG,
    };
    use crate::model::{DiscographyItem, TrAlbum};
    use scraper::Html;

    #[test]
    fn test_track_page_round_trips_through_extractor() {
        let page = fixtures::track_page(&fixtures::tralbum_json(
            "The Band",
            Some("first-light"),
            "Opening",
            1,
            Some("https://cdn.example/1.mp3"),
        ));
        let document = Html::parse_document(&page);
        let tralbum: TrAlbum = find_embedded_json(&document, TRALBUM_TAG, TRALBUM_ATTR)
            .unwrap()
            .unwrap();

        let track = tralbum.into_track();
        assert_eq!(track.relative_path(), "The Band/First Light/01 - Opening.mp3");
        assert_eq!(track.download_url.as_deref(), Some("https://cdn.example/1.mp3"));
    }

    #[test]
    fn test_discography_manifest_is_readable() {
        let page = fixtures::discography_page(&["/album/a"], &[]);
        let document = Html::parse_document(&page);
        let items: Vec<DiscographyItem> = find_embedded_json(&document, MANIFEST_TAG, MANIFEST_ATTR)
            .unwrap()
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].page_url, "/album/a");
    }

    #[test]
    fn test_empty_manifest_is_kept_on_page() {
        let page = fixtures::discography_page_with_manifest(&[], &["/album/a"]);
        assert!(page.contains("data-client-items=\"[]\""));
    }
}
