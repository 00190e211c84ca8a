//! Wiring of the four stores over one storage backend.

use fashion_core::experience::ExperienceStore;
use fashion_core::stylist::StylistStore;
use fashion_core::ui::UiStore;
use fashion_core::user::UserStore;
use fashion_core::{MonotonicClockIds, Result, StateStorage, Store, StoreOptions};
use fashion_infrastructure::{FileStateStorage, MemoryStateStorage};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;

/// Owns one store per domain. Cloning shares the same stores.
#[derive(Clone)]
pub struct AppContext {
    user: Arc<UserStore>,
    stylist: Arc<StylistStore>,
    experience: Arc<ExperienceStore>,
    ui: Arc<UiStore>,
    storage: Arc<dyn StateStorage>,
}

impl AppContext {
    /// Opens every store against `storage`, hydrating from it.
    pub fn open(storage: Arc<dyn StateStorage>, options: StoreOptions) -> Self {
        let context = Self {
            user: Arc::new(Store::open(storage.clone(), options.clone())),
            stylist: Arc::new(Store::open(storage.clone(), options.clone())),
            experience: Arc::new(Store::open(storage.clone(), options.clone())),
            ui: Arc::new(Store::open(storage.clone(), options.clone())),
            storage,
        };
        info!(
            namespace = %options.namespace,
            persist_mode = ?options.persist_mode,
            "Opened state stores"
        );
        context
    }

    /// Opens file-backed stores as configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let files = FileStateStorage::new(config.state_dir()?);
        info!(dir = %files.dir().display(), "Using file state storage");
        let storage: Arc<dyn StateStorage> = Arc::new(files);
        let options = config.store_options(Arc::new(MonotonicClockIds::new()));
        Ok(Self::open(storage, options))
    }

    /// Stores backed by process memory only.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStateStorage::new()), StoreOptions::default())
    }

    pub fn user(&self) -> &Arc<UserStore> {
        &self.user
    }

    pub fn stylist(&self) -> &Arc<StylistStore> {
        &self.stylist
    }

    pub fn experience(&self) -> &Arc<ExperienceStore> {
        &self.experience
    }

    pub fn ui(&self) -> &Arc<UiStore> {
        &self.ui
    }

    pub fn storage(&self) -> &Arc<dyn StateStorage> {
        &self.storage
    }

    /// True when any deferred store has unwritten commits.
    pub fn is_dirty(&self) -> bool {
        self.user.is_dirty()
            || self.stylist.is_dirty()
            || self.experience.is_dirty()
            || self.ui.is_dirty()
    }

    /// Flushes every store. Returns true when all of them are up to date.
    pub fn flush_all(&self) -> bool {
        let results = [
            self.user.flush(),
            self.stylist.flush(),
            self.experience.flush(),
            self.ui.flush(),
        ];
        let ok = results.iter().all(|done| *done);
        if !ok {
            warn!("Some stores could not be flushed");
        }
        ok
    }

    /// Resets every store to its defaults (sign-out).
    pub fn clear_all(&self) {
        self.user.reset();
        self.stylist.reset();
        self.experience.reset();
        self.ui.reset();
        info!("Cleared all stores");
    }

    /// Deletes every persisted record and returns all stores to their
    /// defaults without writing them back. Used when stored state is no
    /// longer trusted.
    pub fn forget_persisted(&self) {
        self.user.forget();
        self.stylist.forget();
        self.experience.forget();
        self.ui.forget();
        info!("Forgot persisted state of all stores");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fashion_core::stylist::Sender;
    use fashion_core::ui::Theme;
    use fashion_core::{PersistMode, SequentialIds, fields_from};
    use serde_json::json;

    fn options(mode: PersistMode) -> StoreOptions {
        StoreOptions::new(Arc::new(SequentialIds::default())).with_persist_mode(mode)
    }

    #[test]
    fn test_stores_share_storage_with_distinct_keys() {
        let storage = Arc::new(MemoryStateStorage::new());
        let context = AppContext::open(storage.clone(), options(PersistMode::EveryCommit));

        context.user().add_to_cart(fields_from(json!({"name": "Jacket", "price": 120})));
        context.ui().set_theme(Theme::Dark);

        assert!(storage.raw("ai-fashion-user-store").is_some());
        assert!(storage.raw("ai-fashion-ui-store").is_some());
        assert!(storage.raw("ai-fashion-stylist-store").is_none());
    }

    #[test]
    fn test_flush_all_writes_deferred_commits() {
        let storage = Arc::new(MemoryStateStorage::new());
        let context = AppContext::open(storage.clone(), options(PersistMode::Deferred));

        let conversation = context.stylist().start_new_conversation();
        context
            .stylist()
            .add_message(conversation.id, "hello", Sender::User);
        context.experience().change_vr_room("runway");

        assert!(context.is_dirty());
        assert!(storage.is_empty());

        assert!(context.flush_all());
        assert!(!context.is_dirty());
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_flush_all_reports_failure() {
        let storage = Arc::new(MemoryStateStorage::new());
        let context = AppContext::open(storage.clone(), options(PersistMode::Deferred));
        context.ui().toggle_theme();

        storage.set_read_only(true);
        assert!(!context.flush_all());
        assert!(context.is_dirty());

        storage.set_read_only(false);
        assert!(context.flush_all());
    }

    #[test]
    fn test_clear_all_restores_defaults() {
        let context = AppContext::in_memory();
        context.user().add_to_wishlist(fields_from(json!({"name": "Scarf"})));
        context.stylist().set_current_mood("happy");
        context.experience().capture_ar_image("frame");
        context.ui().set_current_page("/ar-try-on");

        context.clear_all();

        assert!(context.user().get_state().wishlist.is_empty());
        assert!(context.stylist().get_state().current_mood.is_empty());
        assert!(context.experience().get_state().ar_state.captured_images.is_empty());
        assert_eq!(context.ui().get_state().navigation.current_page, "/");
    }

    #[test]
    fn test_forget_persisted_removes_every_record() {
        let storage = Arc::new(MemoryStateStorage::new());
        let context = AppContext::open(storage.clone(), options(PersistMode::EveryCommit));
        context.user().add_to_cart(fields_from(json!({"name": "Jacket", "price": 120})));
        context.stylist().start_new_conversation();
        context.experience().change_vr_room("runway");
        context.ui().set_theme(Theme::Dark);
        assert_eq!(storage.len(), 4);

        context.forget_persisted();

        assert!(storage.is_empty());
        assert!(context.user().get_state().cart.is_empty());
        assert_eq!(context.ui().get_state().theme, Theme::Light);

        let reopened = AppContext::open(storage.clone(), options(PersistMode::EveryCommit));
        assert!(reopened.stylist().get_state().conversations.is_empty());
    }

    #[test]
    fn test_reopen_with_clock_ids_never_reuses_ids() {
        let storage = Arc::new(MemoryStateStorage::new());
        let clock_options = || {
            StoreOptions::new(Arc::new(MonotonicClockIds::new()))
                .with_persist_mode(PersistMode::Deferred)
        };

        // A burst of appends runs the ids ahead of the wall clock.
        let persisted: Vec<_> = {
            let context = AppContext::open(storage.clone(), clock_options());
            let ids: Vec<_> = (0..200)
                .map(|i| {
                    let item = fields_from(json!({"name": format!("Item {}", i)}));
                    context.user().add_to_cart(item)
                })
                .collect();
            assert!(context.flush_all());
            ids
        };

        let context = AppContext::open(storage.clone(), clock_options());
        let fresh = context.user().add_to_cart(fields_from(json!({"name": "Belt"})));

        assert!(!persisted.contains(&fresh));
        context.user().remove_from_cart(fresh);
        assert_eq!(context.user().get_state().cart.len(), 200);
    }
}
