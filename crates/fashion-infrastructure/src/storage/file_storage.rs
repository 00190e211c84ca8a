//! File-backed state storage: one JSON file per store record.

use fashion_core::{FashionError, Result, StateStorage};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::atomic_json::AtomicJsonFile;

/// Stores each record as `<dir>/<key>.json`.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/ai-fashion/state/
/// ├── ai-fashion-user-store.json
/// ├── ai-fashion-stylist-store.json
/// ├── ai-fashion-experience-store.json
/// └── ai-fashion-ui-store.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    dir: PathBuf,
}

impl FileStateStorage {
    /// Creates a storage rooted at `dir`. The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are restricted to ASCII letters, digits, `-`, `_` and `.` (not
    /// leading) so a key can never escape the storage directory.
    pub fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(FashionError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn file(&self, key: &str) -> Result<AtomicJsonFile<Value>> {
        Ok(AtomicJsonFile::new(self.record_path(key)?))
    }
}

impl StateStorage for FileStateStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let file = self.file(key)?;
        let value = file.load()?;
        debug!(key, path = %file.path().display(), found = value.is_some(), "Loaded record");
        Ok(value)
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let file = self.file(key)?;
        file.save(value)?;
        debug!(key, path = %file.path().display(), "Saved record");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file(key)?.remove()?;
        Ok(())
    }
}
