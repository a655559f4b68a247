//! Track catalog - an index of files already saved under the output root.
//!
//! The catalog is consulted before every track download and updated after
//! every successful save, so repeated crawls skip what is already on disk.

mod memory;

pub use memory::InMemoryCatalog;

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of trying to claim a path for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The caller owns the path until it calls `update` or `release`.
    Reserved,
    /// The path is already on disk.
    Present,
    /// Another scraper is downloading the path right now.
    InFlight,
}

/// Trait for the dedup index shared by every scraper of a crawl.
///
/// Keys are output paths relative to the root, joined with `/`.
/// Implementations serialize all access, so `try_reserve` is an atomic
/// check-then-claim.
pub trait TrackCatalog: Send + Sync {
    /// Whether the path is already present.
    fn contains(&self, path: &str) -> bool;

    /// Copy of every present path.
    fn snapshot(&self) -> HashSet<String>;

    /// Mark a path present. Entries are never removed.
    fn update(&self, path: &str);

    /// Atomically check the path and claim it if nobody has it.
    fn try_reserve(&self, path: &str) -> Reservation;

    /// Drop a claim without marking the path present.
    fn release(&self, path: &str);

    /// Number of present paths.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
