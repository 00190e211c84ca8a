//! Storage adapter contract.

use serde_json::Value;

use crate::error::Result;

/// Durable key-value medium for persisted store snapshots.
///
/// Implementations live in the infrastructure crate (JSON files, in-memory).
/// One record per store domain, addressed by a namespaced key such as
/// `ai-fashion-user-store`.
///
/// Adapters report failures through `Result`; the store absorbs every error
/// and falls back to defaults, so an adapter never needs to be lenient itself.
pub trait StateStorage: Send + Sync {
    /// Loads the record stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Value))`: A record exists and parsed as JSON
    /// - `Ok(None)`: No record under this key
    /// - `Err`: The medium is unavailable or the record is malformed
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Saves `value` under `key`, replacing any previous record.
    fn save(&self, key: &str, value: &Value) -> Result<()>;

    /// Removes the record under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
