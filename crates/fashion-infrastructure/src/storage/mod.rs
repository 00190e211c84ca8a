//! Storage adapters for persisted store records.

mod atomic_json;
mod file_storage;
mod memory_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_storage::FileStateStorage;
pub use memory_storage::MemoryStateStorage;
