//! JSON snapshot persistence: an escape hatch for manually uploaded
//! datasets, kept under a fixed key. Not part of the primary load path and
//! deliberately unversioned.

use std::fs;
use std::path::{Path, PathBuf};

use aerodex_model::Record;

use crate::StoreError;

/// Fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "aero-data";

/// A single-slot key/value persistence mechanism holding one serialized
/// record list as `{dir}/aero-data.json`.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A store under the platform's local data directory, or `None` when the
    /// platform has no such notion.
    pub fn in_default_dir() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join("aerodex")))
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{SNAPSHOT_KEY}.json"))
    }

    /// Persist the record list, replacing any previous snapshot.
    pub fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec(records)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    /// Restore the saved record list; `Ok(None)` when no snapshot exists.
    pub fn restore(&self) -> Result<Option<Vec<Record>>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Remove the snapshot if present.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
