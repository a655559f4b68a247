//! Mock persister for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::model::Track;
use crate::persist::{Persister, SaveError};

/// Mock implementation of the Persister trait.
///
/// Records saved tracks with their bytes instead of touching the disk.
#[derive(Debug, Default)]
pub struct MockPersister {
    /// Every successful save, in order.
    saves: Arc<RwLock<Vec<(Track, Vec<u8>)>>>,
    /// If set, every save fails with this reason.
    failure: Arc<RwLock<Option<String>>>,
}

impl MockPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following save fail.
    pub fn set_failure(&self, reason: &str) {
        *self.failure.write().unwrap() = Some(reason.to_string());
    }

    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Saved tracks and their bytes.
    pub fn saves(&self) -> Vec<(Track, Vec<u8>)> {
        self.saves.read().unwrap().clone()
    }

    /// Relative paths of everything saved.
    pub fn saved_paths(&self) -> Vec<String> {
        self.saves
            .read()
            .unwrap()
            .iter()
            .map(|(track, _)| track.relative_path())
            .collect()
    }
}

#[async_trait]
impl Persister for MockPersister {
    async fn save(&self, data: &[u8], track: &Track) -> Result<PathBuf, SaveError> {
        let path = PathBuf::from(track.relative_path());

        if let Some(reason) = self.failure.read().unwrap().clone() {
            return Err(SaveError::WriteFailed {
                path,
                source: std::io::Error::other(reason),
            });
        }

        self.saves
            .write()
            .unwrap()
            .push((track.clone(), data.to_vec()));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track {
            title: "T".to_string(),
            track_number: 2,
            artist: "A".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_records_saves() {
        let persister = MockPersister::new();
        let path = persister.save(b"abc", &track()).await.unwrap();

        assert_eq!(path, PathBuf::from("A/02 - T.mp3"));
        assert_eq!(persister.saved_paths(), vec!["A/02 - T.mp3"]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let persister = MockPersister::new();
        persister.set_failure("disk full");
        assert!(persister.save(b"abc", &track()).await.is_err());

        persister.clear_failure();
        assert!(persister.save(b"abc", &track()).await.is_ok());
        assert_eq!(persister.saves().len(), 1);
    }
}
