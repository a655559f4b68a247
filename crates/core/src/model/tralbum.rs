//! Shapes of the JSON payloads the site embeds in its pages.
//!
//! Only the fields the crawler reads are declared; everything else in the
//! payload is ignored.

use serde::Deserialize;

use super::track::{humanize_slug, Track};

/// `data-tralbum` payload of a track (or album) page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrAlbum {
    pub artist: String,
    pub current: Current,
    pub album_url: Option<String>,
    pub url: String,
    pub trackinfo: Vec<TrackInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Current {
    pub title: String,
    pub track_number: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub track_num: Option<u32>,
    pub file: Option<TrackFile>,
}

/// Streamable encodings of a track.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackFile {
    #[serde(rename = "mp3-128")]
    pub mp3_128: Option<String>,
}

impl TrAlbum {
    /// Album display name derived from the album URL slug, if the track belongs to one.
    pub fn album_name(&self) -> Option<String> {
        self.album_url
            .as_deref()
            .map(humanize_slug)
            .filter(|name| !name.is_empty())
    }

    /// The first track's mp3 stream, when the page exposes one.
    pub fn download_url(&self) -> Option<String> {
        self.trackinfo
            .first()
            .and_then(|info| info.file.as_ref())
            .and_then(|file| file.mp3_128.clone())
            .filter(|url| !url.is_empty())
    }

    pub fn into_track(self) -> Track {
        Track {
            album: self.album_name(),
            download_url: self.download_url(),
            title: self.current.title,
            track_number: self.current.track_number.unwrap_or_default(),
            artist: self.artist,
            source_url: self.url,
        }
    }
}

/// One entry of the discography manifest (`data-client-items`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscographyItem {
    pub page_url: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<u64>,
}
