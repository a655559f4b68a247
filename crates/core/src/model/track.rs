//! The track record and its canonical on-disk location.

use serde::{Deserialize, Serialize};

/// Extension of every saved asset.
pub const TRACK_EXTENSION: &str = "mp3";

/// Metadata of one track page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Position in the album; 0 when the page does not say.
    pub track_number: u32,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Page the metadata was read from.
    pub source_url: String,
    /// Audio asset; `None` means the track cannot be downloaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl Track {
    /// File name inside the artist/album folder: `NN - Title.mp3`.
    pub fn file_name(&self) -> String {
        format!("{:02} - {}.{}", self.track_number, self.title, TRACK_EXTENSION)
    }

    /// Canonical path relative to the output root: `artist/[album/]NN - title.mp3`.
    ///
    /// Segments are always joined with `/`, which is also how the catalog
    /// keys files found on disk. An empty artist or album has no folder, so
    /// the file lands one level up.
    pub fn relative_path(&self) -> String {
        let file_name = self.file_name();
        let folders = [Some(self.artist.as_str()), self.album.as_deref()];
        let mut segments: Vec<&str> = folders
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty())
            .collect();
        segments.push(&file_name);
        segments.join("/")
    }
}

/// Turn an album slug (`/album/test-album-name` or `test-album-name`) into a
/// display name (`Test Album Name`).
pub fn humanize_slug(slug: &str) -> String {
    let slug = match slug.rfind("/album/") {
        Some(idx) => &slug[idx + "/album/".len()..],
        None => slug,
    };

    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
