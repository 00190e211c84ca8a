//! Shared test doubles for store tests.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{FashionError, Result};
use crate::storage::StateStorage;

/// In-memory storage that counts writes and can be told to fail.
#[derive(Default)]
pub struct MockStorage {
    records: Mutex<HashMap<String, Value>>,
    saves: AtomicUsize,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(key: &str, value: Value) -> Self {
        let storage = Self::new();
        storage.records.lock().unwrap().insert(key.to_string(), value);
        storage
    }

    pub fn record(&self, key: &str) -> Option<Value> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl StateStorage for MockStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(FashionError::data_access("storage unavailable"));
        }
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(FashionError::data_access("quota exceeded"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}
