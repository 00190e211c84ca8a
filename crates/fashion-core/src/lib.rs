//! Client state layer for the AI Fashion app.
//!
//! Four independent store domains (user, stylist, experience, ui), each a
//! [`store::Store`] holding immutable snapshots, notifying listeners
//! synchronously and persisting a partialized subset through a
//! [`storage::StateStorage`] adapter.

pub mod error;
pub mod experience;
pub mod id;
pub mod record;
pub mod storage;
pub mod store;
pub mod stylist;
pub mod ui;
pub mod user;

#[cfg(test)]
mod test_support;

// Re-export common types
pub use error::{FashionError, Result};
pub use id::{EntityId, IdGenerator, MonotonicClockIds, SequentialIds};
pub use record::{Fields, Record, fields_from};
pub use storage::StateStorage;
pub use store::{DEFAULT_NAMESPACE, Domain, PersistMode, Store, StoreOptions, Subscription};
