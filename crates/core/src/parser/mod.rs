//! HTML parsing.
//!
//! The parsed [`Html`] tree is not `Send`; callers keep it inside a scope
//! that does not cross an `.await`.

use scraper::Html;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Page is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// Turns a page body into a document tree.
pub trait Parser: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<Html, ParseError>;
}

/// html5ever-based parser (via `scraper`).
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for HtmlParser {
    fn parse(&self, body: &[u8]) -> Result<Html, ParseError> {
        let text = std::str::from_utf8(body)?;
        Ok(Html::parse_document(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_page() {
        let document = HtmlParser::new()
            .parse(b"<html><body><a href=\"/track/x\">x</a></body></html>")
            .unwrap();
        assert_eq!(
            crate::extract::collect_links(&document, "track"),
            vec!["/track/x"]
        );
    }

    #[test]
    fn test_parse_tolerates_broken_markup() {
        assert!(HtmlParser::new().parse(b"<div><p>unclosed <a href=").is_ok());
    }

    #[test]
    fn test_parse_invalid_utf8_fails() {
        let result = HtmlParser::new().parse(&[0x3c, 0xff, 0xfe, 0x3e]);
        assert!(matches!(result, Err(ParseError::InvalidEncoding(_))));
    }
}
