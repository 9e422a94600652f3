//! JSON snapshot of stored trips on disk.

use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::record::StoredTrip;

/// A JSON file holding every stored trip.
#[derive(Debug, Clone)]
pub struct TripSnapshot {
    path: PathBuf,
}

impl TripSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load trips from the snapshot.
    ///
    /// A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Vec<StoredTrip>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            message: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })
    }

    /// Replace the snapshot with the given trips.
    ///
    /// Creates parent directories if they don't exist. The file is written
    /// to a temporary sibling first and renamed into place.
    pub fn save(&self, trips: &[&StoredTrip]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(trips).map_err(|e| StoreError::Json {
            message: format!("failed to serialize trips: {}", e),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Io {
            message: format!("failed to write {}: {}", tmp.display(), e),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io {
            message: format!("failed to replace {}: {}", self.path.display(), e),
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
