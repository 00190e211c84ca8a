pub mod paths;
pub mod storage;

pub use crate::paths::{FashionPaths, PathError};
pub use crate::storage::{AtomicJsonError, AtomicJsonFile, FileStateStorage, MemoryStateStorage};
