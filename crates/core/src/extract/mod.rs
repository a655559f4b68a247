//! HTML extraction: link scanning, embedded JSON decoding and link filtering.

mod html;
mod links;

pub use html::{
    collect_links, find_embedded_json, DecodeError, MANIFEST_ATTR, MANIFEST_TAG, TRALBUM_ATTR,
    TRALBUM_TAG,
};
pub use links::{filter_links, LinkKind};
