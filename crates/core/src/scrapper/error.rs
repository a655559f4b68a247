use thiserror::Error;

use crate::extract::DecodeError;
use crate::parser::ParseError;
use crate::persist::SaveError;
use crate::retriever::FetchError;

/// Any failure of a crawl, at any depth.
///
/// Errors raised by a nested scrapper reach the caller as they were raised.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("Cannot resolve link {link} against {base}: {reason}")]
    InvalidLink {
        base: String,
        link: String,
        reason: String,
    },
}
