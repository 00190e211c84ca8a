//! Experience store: AR, VR and avatar sub-trees.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{ArState, ArUpdate, AvatarState, AvatarUpdate, CapturedImage, VrState, VrUpdate};
use crate::id::EntityId;
use crate::store::{Domain, Store};

/// Full experience state. All three sub-trees persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceState {
    pub ar_state: ArState,
    pub vr_state: VrState,
    pub avatar_state: AvatarState,
}

#[derive(Debug, Clone)]
pub enum ExperienceAction {
    UpdateAr(ArUpdate),
    UpdateVr(VrUpdate),
    UpdateAvatar(AvatarUpdate),
    CaptureImage(CapturedImage),
    RemoveCapturedImage(EntityId),
    ClearCapturedImages,
    SelectOutfit(Option<Value>),
    ChangeRoom(String),
    SaveAvatar(Value),
}

pub struct ExperienceDomain;

impl Domain for ExperienceDomain {
    type State = ExperienceState;
    type Action = ExperienceAction;
    type Persisted = ExperienceState;

    const NAME: &'static str = "experience-store";

    fn reduce(state: &ExperienceState, action: ExperienceAction) -> ExperienceState {
        let mut next = state.clone();
        match action {
            ExperienceAction::UpdateAr(update) => next.ar_state = update.apply(&state.ar_state),
            ExperienceAction::UpdateVr(update) => next.vr_state = update.apply(&state.vr_state),
            ExperienceAction::UpdateAvatar(update) => {
                next.avatar_state = update.apply(&state.avatar_state)
            }
            ExperienceAction::CaptureImage(image) => next.ar_state.captured_images.push(image),
            ExperienceAction::RemoveCapturedImage(id) => {
                next.ar_state.captured_images.retain(|image| image.id != id)
            }
            ExperienceAction::ClearCapturedImages => next.ar_state.captured_images.clear(),
            ExperienceAction::SelectOutfit(outfit) => next.ar_state.selected_outfit = outfit,
            ExperienceAction::ChangeRoom(room) => next.vr_state.current_room = room,
            ExperienceAction::SaveAvatar(avatar) => next.avatar_state.saved_avatars.push(avatar),
        }
        next
    }

    fn partialize(state: &ExperienceState) -> ExperienceState {
        state.clone()
    }

    fn restore(persisted: ExperienceState) -> ExperienceState {
        persisted
    }

    fn max_id(state: &ExperienceState) -> Option<EntityId> {
        state.ar_state.captured_images.iter().map(|image| image.id).max()
    }
}

pub type ExperienceStore = Store<ExperienceDomain>;

impl Store<ExperienceDomain> {
    pub fn update_ar_state(&self, update: ArUpdate) {
        self.dispatch(ExperienceAction::UpdateAr(update));
    }

    pub fn update_vr_state(&self, update: VrUpdate) {
        self.dispatch(ExperienceAction::UpdateVr(update));
    }

    pub fn update_avatar_state(&self, update: AvatarUpdate) {
        self.dispatch(ExperienceAction::UpdateAvatar(update));
    }

    /// Stores a captured camera frame and returns its id.
    pub fn capture_ar_image(&self, data: impl Into<String>) -> EntityId {
        let image = CapturedImage {
            id: self.next_id(),
            data: data.into(),
            timestamp: Utc::now(),
        };
        let id = image.id;
        self.dispatch(ExperienceAction::CaptureImage(image));
        id
    }

    pub fn remove_captured_image(&self, id: EntityId) {
        self.dispatch(ExperienceAction::RemoveCapturedImage(id));
    }

    pub fn clear_captured_images(&self) {
        self.dispatch(ExperienceAction::ClearCapturedImages);
    }

    pub fn select_outfit(&self, outfit: Option<Value>) {
        self.dispatch(ExperienceAction::SelectOutfit(outfit));
    }

    pub fn change_vr_room(&self, room: impl Into<String>) {
        self.dispatch(ExperienceAction::ChangeRoom(room.into()));
    }

    pub fn save_avatar(&self, avatar: Value) {
        self.dispatch(ExperienceAction::SaveAvatar(avatar));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::store::StoreOptions;
    use crate::test_support::MockStorage;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn open(storage: &Arc<MockStorage>) -> ExperienceStore {
        Store::open(storage.clone(), StoreOptions::new(Arc::new(SequentialIds::new(1))))
    }

    #[test]
    fn test_capture_appends_with_unique_ids() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        let first = store.capture_ar_image("data:image/png;base64,AAA");
        let second = store.capture_ar_image("data:image/png;base64,BBB");

        let images = store.get_state().ar_state.captured_images.clone();
        assert_eq!(images.len(), 2);
        assert_ne!(first, second);
        assert_eq!(images[0].id, first);
        assert_eq!(images[1].data, "data:image/png;base64,BBB");
    }

    #[test]
    fn test_remove_and_clear_captured_images() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);
        let first = store.capture_ar_image("a");
        store.capture_ar_image("b");

        store.remove_captured_image(first);
        assert_eq!(store.get_state().ar_state.captured_images.len(), 1);

        store.remove_captured_image(EntityId(999));
        assert_eq!(store.get_state().ar_state.captured_images.len(), 1);

        store.clear_captured_images();
        assert!(store.get_state().ar_state.captured_images.is_empty());
    }

    #[test]
    fn test_select_outfit_and_change_room() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        store.select_outfit(Some(json!({"name": "Evening Look"})));
        store.change_vr_room("runway");

        let state = store.get_state();
        assert_eq!(state.ar_state.selected_outfit, Some(json!({"name": "Evening Look"})));
        assert_eq!(state.vr_state.current_room, "runway");
        assert_eq!(state.avatar_state, AvatarState::default());
    }

    #[test]
    fn test_partial_updates_leave_siblings() {
        let storage = Arc::new(MockStorage::new());
        let store = open(&storage);

        store.update_vr_state(VrUpdate {
            active_users: Some(12),
            ..Default::default()
        });
        store.update_avatar_state(AvatarUpdate {
            measurements: Some(BTreeMap::from([("height".to_string(), 168.0)])),
            ..Default::default()
        });
        store.update_ar_state(ArUpdate {
            is_recording: Some(true),
            ..Default::default()
        });

        let state = store.get_state();
        assert_eq!(state.vr_state.active_users, 12);
        assert_eq!(state.vr_state.current_room, "main");
        assert_eq!(state.avatar_state.measurements["height"], 168.0);
        assert!(state.ar_state.is_recording);
        assert!(!state.ar_state.is_active);
    }

    #[test]
    fn test_round_trip_persists_all_sub_trees() {
        let storage = Arc::new(MockStorage::new());
        {
            let store = open(&storage);
            store.capture_ar_image("frame");
            store.change_vr_room("lounge");
            store.save_avatar(json!({"name": "Me"}));
        }

        let reloaded = open(&storage);
        let state = reloaded.get_state();
        assert_eq!(state.ar_state.captured_images.len(), 1);
        assert_eq!(state.vr_state.current_room, "lounge");
        assert_eq!(state.avatar_state.saved_avatars, vec![json!({"name": "Me"})]);

        let record = storage.record("ai-fashion-experience-store").unwrap();
        assert!(record["state"]["arState"].is_object());
        assert!(record["state"]["vrState"].is_object());
        assert!(record["state"]["avatarState"].is_object());
    }

    #[test]
    fn test_capture_after_reload_gets_fresh_id() {
        let storage = Arc::new(MockStorage::new());
        let first = open(&storage).capture_ar_image("frame-1");

        let reloaded = open(&storage);
        let second = reloaded.capture_ar_image("frame-2");

        assert!(second > first);
        reloaded.remove_captured_image(second);
        assert_eq!(reloaded.get_state().ar_state.captured_images.len(), 1);
    }
}
