//! In-memory state storage.

use fashion_core::{FashionError, Result, StateStorage};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// Keeps records as serialized JSON strings in memory.
///
/// Records go through the same serialize/parse cycle as the file storage,
/// so a reload from this storage exercises the real round-trip. Useful for
/// tests and for sessions that must not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStateStorage {
    records: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text under `key`, bypassing serialization. Lets callers
    /// plant malformed data.
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), raw.into());
    }

    /// Raw stored text under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When set, every save fails, as a full browser storage quota would.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl StateStorage for MemoryStateStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        match records.get(key) {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(raw)?)),
            _ => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(FashionError::data_access(format!(
                "Storage is read-only, cannot save '{}'",
                key
            )));
        }
        let raw = serde_json::to_string(value)?;
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(FashionError::data_access(format!(
                "Storage is read-only, cannot remove '{}'",
                key
            )));
        }
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
