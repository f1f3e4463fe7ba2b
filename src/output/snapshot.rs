// src/output/snapshot.rs
//! The on-disk snapshot: a pretty-printed JSON array of every published post.

use super::writer::write_atomically;
use crate::constants::SNAPSHOT_FILE_NAME;
use crate::error::AppError;
use crate::model::ContentItem;
use crate::pipeline::SnapshotSink;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `<data_dir>/posts.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SNAPSHOT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the previous snapshot.
    ///
    /// A missing file is the normal first-run state. An unreadable or
    /// malformed file is logged and treated the same way, which only costs a
    /// full refetch.
    pub fn load(&self) -> Vec<ContentItem> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No snapshot at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Could not read snapshot {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ContentItem>>(&json) {
            Ok(items) => items,
            Err(e) => {
                log::warn!(
                    "Ignoring malformed snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Atomically replaces the snapshot with `items`.
    pub fn write(&self, items: &[ContentItem]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(items).map_err(|e| self.write_error(e.into()))?;
        write_atomically(&self.path, &json).map_err(|e| self.write_error(e))?;
        log::info!("Saved {} posts to {}", items.len(), self.path.display());
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> AppError {
        AppError::SnapshotWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotSink for SnapshotStore {
    fn write(&self, items: &[ContentItem]) -> Result<(), AppError> {
        SnapshotStore::write(self, items)
    }
}
