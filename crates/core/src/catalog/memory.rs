//! In-memory catalog built from a walk of the output tree.

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path};
use std::sync::Mutex;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::{CatalogError, Reservation, TrackCatalog};

#[derive(Debug, Default)]
struct CatalogState {
    present: HashSet<String>,
    in_flight: HashSet<String>,
}

/// Catalog of files already present under the output root.
///
/// Only obtainable through [`InMemoryCatalog::generate`] (or `empty` in
/// tests), so every handle has seen the complete listing.
#[derive(Debug)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    /// Walk `root` recursively and index every regular file, relative to `root`.
    pub fn generate(root: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let root = root.as_ref();

        let metadata = std::fs::metadata(root).map_err(|e| CatalogError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(CatalogError::Io {
                path: root.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotADirectory,
                    "catalog root is not a directory",
                ),
            });
        }

        let mut present = HashSet::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(|e| CatalogError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                source: io::Error::from(e),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(key) = relative_key(root, entry.path()) {
                debug!(path = %key, "Cataloged existing file");
                present.insert(key);
            }
        }

        info!(root = %root.display(), files = present.len(), "Catalog generated");

        Ok(Self {
            state: Mutex::new(CatalogState {
                present,
                in_flight: HashSet::new(),
            }),
        })
    }

    /// A catalog with nothing in it (useful for testing).
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
        }
    }
}

/// `/`-joined path of `path` below `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    (!segments.is_empty()).then(|| segments.join("/"))
}

impl TrackCatalog for InMemoryCatalog {
    fn contains(&self, path: &str) -> bool {
        self.state.lock().unwrap().present.contains(path)
    }

    fn snapshot(&self) -> HashSet<String> {
        self.state.lock().unwrap().present.clone()
    }

    fn update(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.in_flight.remove(path);
        state.present.insert(path.to_string());
    }

    fn try_reserve(&self, path: &str) -> Reservation {
        let mut state = self.state.lock().unwrap();
        if state.present.contains(path) {
            Reservation::Present
        } else if !state.in_flight.insert(path.to_string()) {
            Reservation::InFlight
        } else {
            Reservation::Reserved
        }
    }

    fn release(&self, path: &str) {
        self.state.lock().unwrap().in_flight.remove(path);
    }

    fn len(&self) -> usize {
        self.state.lock().unwrap().present.len()
    }
}
