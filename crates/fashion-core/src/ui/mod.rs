//! UI and theme domain.

mod model;
mod store;

pub use model::{DEFAULT_LOADING_KEYS, Navigation, Theme, breadcrumbs_for};
pub use store::{PersistedNavigation, PersistedUi, UiAction, UiDomain, UiState, UiStore};
