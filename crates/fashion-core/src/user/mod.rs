//! User profile & commerce domain.
//!
//! # Module Structure
//!
//! - `model`: Profile, preferences and partial-update types
//! - `store`: Actions, transitions and persistence rules
//!
//! # Usage
//!
//! ```ignore
//! use fashion_core::user::{UserStore, ProfileUpdate};
//! ```

mod model;
mod store;

pub use model::{BudgetRange, Measurements, PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile};
pub use store::{PersistedUser, UserAction, UserDomain, UserState, UserStore};
