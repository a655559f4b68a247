//! Persistence of downloaded tracks.

mod local;

pub use local::LocalPersister;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Track;

/// Errors that can occur while saving a track.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The track's metadata would place the file outside the output root.
    #[error("Refusing to save outside the output root: {path}")]
    InvalidPath { path: String },

    /// Failed to create the artist/album directory.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes a downloaded asset to its canonical location.
#[async_trait]
pub trait Persister: Send + Sync {
    /// Save `data` for `track` at `track.relative_path()` below the root,
    /// creating directories as needed. Returns the written file.
    async fn save(&self, data: &[u8], track: &Track) -> Result<PathBuf, SaveError>;
}
