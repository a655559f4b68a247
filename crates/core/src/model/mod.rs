//! Domain records: tracks and the embedded page payloads they are built from.

mod track;
mod tralbum;

pub use track::{humanize_slug, Track, TRACK_EXTENSION};
pub use tralbum::{Current, DiscographyItem, TrAlbum, TrackFile, TrackInfo};
