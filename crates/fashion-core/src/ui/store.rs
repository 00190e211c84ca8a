//! UI store: theme, navigation, notifications and loading flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::{DEFAULT_LOADING_KEYS, Navigation, Theme, breadcrumbs_for};
use crate::id::EntityId;
use crate::record::{Fields, Record};
use crate::store::{Domain, Store};

/// Full UI state.
///
/// Only the theme, color scheme, current page and breadcrumbs survive a
/// reload. Notifications, loading flags and the drawer's open state are
/// runtime-only.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub theme: Theme,
    pub color_scheme: String,
    pub navigation: Navigation,
    pub notifications: Vec<Record>,
    pub loading: BTreeMap<String, bool>,
}

impl UiState {
    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.get(key).copied().unwrap_or(false)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color_scheme: "default".to_string(),
            navigation: Navigation::default(),
            notifications: Vec::new(),
            loading: DEFAULT_LOADING_KEYS
                .iter()
                .map(|key| (key.to_string(), false))
                .collect(),
        }
    }
}

/// Persisted part of [`Navigation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedNavigation {
    pub current_page: String,
    pub breadcrumbs: Vec<String>,
}

impl Default for PersistedNavigation {
    fn default() -> Self {
        let navigation = Navigation::default();
        Self {
            current_page: navigation.current_page,
            breadcrumbs: navigation.breadcrumbs,
        }
    }
}

/// Persisted layout of the `ui-store` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedUi {
    pub theme: Theme,
    pub color_scheme: String,
    pub navigation: PersistedNavigation,
}

impl Default for PersistedUi {
    fn default() -> Self {
        UiDomain::partialize(&UiState::default())
    }
}

#[derive(Debug, Clone)]
pub enum UiAction {
    ToggleTheme,
    SetTheme(Theme),
    SetColorScheme(String),
    ToggleNavigation,
    /// Navigates to a page, recomputing breadcrumbs.
    SetCurrentPage(String),
    AddNotification(Record),
    RemoveNotification(EntityId),
    ClearNotifications,
    SetLoading { key: String, value: bool },
}

pub struct UiDomain;

impl Domain for UiDomain {
    type State = UiState;
    type Action = UiAction;
    type Persisted = PersistedUi;

    const NAME: &'static str = "ui-store";

    fn reduce(state: &UiState, action: UiAction) -> UiState {
        let mut next = state.clone();
        match action {
            UiAction::ToggleTheme => next.theme = state.theme.toggled(),
            UiAction::SetTheme(theme) => next.theme = theme,
            UiAction::SetColorScheme(scheme) => next.color_scheme = scheme,
            UiAction::ToggleNavigation => next.navigation.is_open = !state.navigation.is_open,
            UiAction::SetCurrentPage(page) => {
                next.navigation.breadcrumbs = breadcrumbs_for(&page);
                next.navigation.current_page = page;
            }
            UiAction::AddNotification(notification) => next.notifications.push(notification),
            UiAction::RemoveNotification(id) => next.notifications.retain(|n| n.id != id),
            UiAction::ClearNotifications => next.notifications.clear(),
            UiAction::SetLoading { key, value } => {
                next.loading.insert(key, value);
            }
        }
        next
    }

    fn partialize(state: &UiState) -> PersistedUi {
        PersistedUi {
            theme: state.theme,
            color_scheme: state.color_scheme.clone(),
            navigation: PersistedNavigation {
                current_page: state.navigation.current_page.clone(),
                breadcrumbs: state.navigation.breadcrumbs.clone(),
            },
        }
    }

    fn restore(persisted: PersistedUi) -> UiState {
        UiState {
            theme: persisted.theme,
            color_scheme: persisted.color_scheme,
            navigation: Navigation {
                is_open: false,
                current_page: persisted.navigation.current_page,
                breadcrumbs: persisted.navigation.breadcrumbs,
            },
            ..UiState::default()
        }
    }
}

pub type UiStore = Store<UiDomain>;

impl Store<UiDomain> {
    pub fn toggle_theme(&self) -> Theme {
        self.dispatch(UiAction::ToggleTheme).theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.dispatch(UiAction::SetTheme(theme));
    }

    pub fn set_color_scheme(&self, scheme: impl Into<String>) {
        self.dispatch(UiAction::SetColorScheme(scheme.into()));
    }

    pub fn toggle_navigation(&self) -> bool {
        self.dispatch(UiAction::ToggleNavigation).navigation.is_open
    }

    pub fn set_current_page(&self, page: impl Into<String>) {
        self.dispatch(UiAction::SetCurrentPage(page.into()));
    }

    /// Queues a notification and returns its id.
    pub fn add_notification(&self, fields: Fields) -> EntityId {
        let notification = Record::new(self.next_id(), fields);
        let id = notification.id;
        self.dispatch(UiAction::AddNotification(notification));
        id
    }

    pub fn remove_notification(&self, id: EntityId) {
        self.dispatch(UiAction::RemoveNotification(id));
    }

    pub fn clear_notifications(&self) {
        self.dispatch(UiAction::ClearNotifications);
    }

    pub fn set_loading(&self, key: impl Into<String>, value: bool) {
        self.dispatch(UiAction::SetLoading {
            key: key.into(),
            value,
        });
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.select(|state| state.is_loading(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::record::fields_from;
    use crate::store::StoreOptions;
    use crate::test_support::MockStorage;
    use serde_json::json;
    use std::sync::Arc;

    fn open(storage: &Arc<MockStorage>) -> UiStore {
        Store::open(storage.clone(), StoreOptions::new(Arc::new(SequentialIds::new(1))))
    }

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.color_scheme, "default");
        assert_eq!(state.navigation.current_page, "/");
        assert_eq!(state.loading.len(), 4);
        assert!(state.loading.values().all(|flag| !flag));
    }

    #[test]
    fn test_toggle_theme_twice() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(store.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_notifications_unique_ids_in_order() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        let ids: Vec<EntityId> = ["Saved", "Added to cart", "Welcome back"]
            .iter()
            .map(|msg| store.add_notification(fields_from(json!({"message": msg, "type": "info"}))))
            .collect();

        let state = store.get_state();
        assert_eq!(state.notifications.len(), 3);
        assert_eq!(state.notifications.iter().map(|n| n.id).collect::<Vec<_>>(), ids);
        assert_eq!(state.notifications[1].get_str("message"), Some("Added to cart"));

        store.remove_notification(ids[1]);
        let state = store.get_state();
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications[1].id, ids[2]);
    }

    #[test]
    fn test_set_loading_adds_arbitrary_keys() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        store.set_loading("aiStylist", true);
        store.set_loading("visualSearch", true);

        assert!(store.is_loading("aiStylist"));
        assert!(store.is_loading("visualSearch"));
        assert!(!store.is_loading("global"));
        assert!(!store.is_loading("unknown"));
    }

    #[test]
    fn test_set_current_page_updates_breadcrumbs() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        store.set_current_page("/vr-showroom/lounge");

        let navigation = store.get_state().navigation.clone();
        assert_eq!(navigation.current_page, "/vr-showroom/lounge");
        assert_eq!(navigation.breadcrumbs, vec!["/vr-showroom", "/vr-showroom/lounge"]);
    }

    #[test]
    fn test_reload_drops_transient_fields() {
        let storage = Arc::new(MockStorage::new());
        {
            let store = open(&storage);
            store.set_theme(Theme::Dark);
            store.set_color_scheme("rose");
            store.set_current_page("/ai-stylist");
            assert!(store.toggle_navigation());
            store.add_notification(fields_from(json!({"message": "hello"})));
            store.set_loading("global", true);
        }

        let reloaded = open(&storage);
        let state = reloaded.get_state();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.color_scheme, "rose");
        assert_eq!(state.navigation.current_page, "/ai-stylist");
        assert_eq!(state.navigation.breadcrumbs, vec!["/ai-stylist"]);
        assert!(!state.navigation.is_open);
        assert!(state.notifications.is_empty());
        assert!(!state.is_loading("global"));

        let record = storage.record("ai-fashion-ui-store").unwrap();
        let persisted = &record["state"];
        assert!(persisted.get("notifications").is_none());
        assert!(persisted.get("loading").is_none());
        assert!(persisted["navigation"].get("isOpen").is_none());
    }
}
