//! Local filesystem persister.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use super::{Persister, SaveError};
use crate::model::Track;

/// Suffix of a file that is still being written.
const PARTIAL_SUFFIX: &str = "part";

/// Saves tracks below a root folder.
#[derive(Debug, Clone)]
pub struct LocalPersister {
    root: PathBuf,
}

impl LocalPersister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute destination of a track, refusing anything that escapes the root.
    pub fn destination(&self, track: &Track) -> Result<PathBuf, SaveError> {
        let relative = track.relative_path();
        let relative_path = Path::new(&relative);

        let escapes = relative_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(SaveError::InvalidPath { path: relative });
        }

        Ok(self.root.join(relative_path))
    }

    async fn ensure_parent_dir(path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SaveError::DirectoryCreationFailed {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                debug!(path = %parent.display(), "Created directory");
            }
        }
        Ok(())
    }

    /// Write to a sibling `.part` file, then rename into place.
    async fn write_file(destination: &Path, data: &[u8]) -> Result<(), SaveError> {
        let mut partial = destination.as_os_str().to_owned();
        partial.push(".");
        partial.push(PARTIAL_SUFFIX);
        let partial = PathBuf::from(partial);

        let write_failed = |e: std::io::Error| SaveError::WriteFailed {
            path: destination.to_path_buf(),
            source: e,
        };

        let file = File::create(&partial).await.map_err(write_failed)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(data).await.map_err(write_failed)?;
        writer.flush().await.map_err(write_failed)?;
        drop(writer);

        if let Err(e) = fs::rename(&partial, destination).await {
            let _ = fs::remove_file(&partial).await;
            return Err(write_failed(e));
        }
        Ok(())
    }
}

#[async_trait]
impl Persister for LocalPersister {
    async fn save(&self, data: &[u8], track: &Track) -> Result<PathBuf, SaveError> {
        let destination = self.destination(track)?;
        Self::ensure_parent_dir(&destination).await?;
        Self::write_file(&destination, data).await?;

        info!(
            path = %destination.display(),
            bytes = data.len(),
            "Saved track"
        );
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn track(album: Option<&str>, title: &str) -> Track {
        Track {
            title: title.to_string(),
            track_number: 1,
            artist: "A".to_string(),
            album: album.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_creates_directories() {
        let temp = TempDir::new().unwrap();
        let persister = LocalPersister::new(temp.path());

        let path = persister
            .save(b"mp3 bytes", &track(Some("B"), "T"))
            .await
            .unwrap();

        assert_eq!(path, temp.path().join("A/B/01 - T.mp3"));
        assert_eq!(fs::read(&path).await.unwrap(), b"mp3 bytes");
        assert!(!temp.path().join("A/B/01 - T.mp3.part").exists());
    }

    #[tokio::test]
    async fn test_save_without_album() {
        let temp = TempDir::new().unwrap();
        let persister = LocalPersister::new(temp.path());

        let path = persister.save(b"x", &track(None, "T")).await.unwrap();
        assert_eq!(path, temp.path().join("A/01 - T.mp3"));
    }

    #[tokio::test]
    async fn test_save_without_artist_writes_to_root() {
        let temp = TempDir::new().unwrap();
        let persister = LocalPersister::new(temp.path());
        let mut track = track(None, "T");
        track.artist = String::new();

        let path = persister.save(b"x", &track).await.unwrap();
        assert_eq!(path, temp.path().join("01 - T.mp3"));
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let persister = LocalPersister::new(temp.path());

        persister.save(b"old", &track(None, "T")).await.unwrap();
        let path = persister.save(b"new", &track(None, "T")).await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_save_rejects_escaping_paths() {
        let temp = TempDir::new().unwrap();
        let persister = LocalPersister::new(temp.path().join("root"));

        let mut evil = track(Some(".."), "T");
        evil.artist = "..".to_string();
        let result = persister.save(b"x", &evil).await;
        assert!(matches!(result, Err(SaveError::InvalidPath { .. })));
    }

    #[tokio::test]
    async fn test_save_fails_when_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::write(&root, b"not a directory").await.unwrap();
        let persister = LocalPersister::new(&root);

        let result = persister.save(b"x", &track(Some("B"), "T")).await;
        assert!(matches!(
            result,
            Err(SaveError::DirectoryCreationFailed { .. })
        ));
    }
}
