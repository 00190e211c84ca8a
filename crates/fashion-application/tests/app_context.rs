use fashion_application::{
    AppConfig, AppContext, StorageConfig, StylistChat, VisualSearch, spawn_autosave,
};
use fashion_core::stylist::Sender;
use fashion_core::ui::Theme;
use fashion_core::user::ProfileUpdate;
use fashion_core::{PersistMode, SequentialIds, StateStorage, StoreOptions, fields_from};
use fashion_infrastructure::{FileStateStorage, MemoryStateStorage};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            dir: Some(dir.path().join("state")),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_file_round_trip_across_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);

    let conversation_id = {
        let context = AppContext::from_config(&config).unwrap();
        context.user().update_profile(ProfileUpdate {
            name: Some("Ada".to_string()),
            ..Default::default()
        });
        context.user().add_to_cart(fields_from(json!({"name": "Jacket", "price": 120})));
        context.user().add_to_cart(fields_from(json!({"name": "Shoes", "price": 80})));
        context.ui().set_theme(Theme::Dark);
        context.ui().set_current_page("/ai-stylist");
        context.experience().change_vr_room("lounge");

        let chat = StylistChat::with_seed(context.stylist().clone(), 1);
        chat.send("hello").unwrap().conversation_id
    };

    let context = AppContext::from_config(&config).unwrap();

    let user = context.user().get_state();
    assert_eq!(user.profile.name, "Ada");
    assert_eq!(user.cart.len(), 2);
    assert_eq!(context.user().cart_total(), 200.0);

    let stylist = context.stylist().get_state();
    assert_eq!(stylist.conversations.len(), 1);
    assert_eq!(stylist.conversations[0].id, conversation_id);
    assert_eq!(stylist.conversations[0].messages.len(), 2);
    assert_eq!(stylist.current_conversation, None);

    assert_eq!(context.ui().get_state().theme, Theme::Dark);
    assert_eq!(context.ui().get_state().navigation.breadcrumbs, vec!["/ai-stylist"]);
    assert_eq!(context.experience().get_state().vr_state.current_room, "lounge");

    let storage = FileStateStorage::new(temp_dir.path().join("state"));
    for key in [
        "ai-fashion-experience-store",
        "ai-fashion-stylist-store",
        "ai-fashion-ui-store",
        "ai-fashion-user-store",
    ] {
        assert!(storage.record_path(key).unwrap().exists(), "missing {}", key);
    }
}

#[test]
fn test_forget_persisted_deletes_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);
    let storage = FileStateStorage::new(temp_dir.path().join("state"));

    let context = AppContext::from_config(&config).unwrap();
    context.ui().set_theme(Theme::Dark);
    context.user().add_to_cart(fields_from(json!({"name": "Jacket", "price": 120})));
    assert!(storage.record_path("ai-fashion-ui-store").unwrap().exists());

    context.forget_persisted();

    assert!(!storage.record_path("ai-fashion-ui-store").unwrap().exists());
    assert!(!storage.record_path("ai-fashion-user-store").unwrap().exists());

    let reopened = AppContext::from_config(&config).unwrap();
    assert_eq!(reopened.ui().get_state().theme, Theme::Light);
    assert!(reopened.user().get_state().cart.is_empty());
}

#[test]
fn test_transient_fields_reset_on_reload() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);

    {
        let context = AppContext::from_config(&config).unwrap();
        context.ui().toggle_navigation();
        context.ui().add_notification(fields_from(json!({"message": "Saved"})));
        context.ui().set_loading("global", true);
        let conversation = context.stylist().start_new_conversation();
        context.stylist().add_message(conversation.id, "hi", Sender::User);
    }

    let context = AppContext::from_config(&config).unwrap();
    let ui = context.ui().get_state();
    assert!(!ui.navigation.is_open);
    assert!(ui.notifications.is_empty());
    assert!(!ui.is_loading("global"));
    assert!(context.stylist().current_conversation().is_none());
    assert_eq!(context.stylist().get_state().conversations.len(), 1);
}

#[test]
fn test_corrupt_record_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);
    let state_dir = temp_dir.path().join("state");
    std::fs::create_dir_all(&state_dir).unwrap();
    std::fs::write(state_dir.join("ai-fashion-user-store.json"), "{ not json").unwrap();

    let context = AppContext::from_config(&config).unwrap();
    assert!(context.user().get_state().cart.is_empty());

    context.user().add_to_wishlist(fields_from(json!({"name": "Scarf"})));
    let record = FileStateStorage::new(&state_dir)
        .load("ai-fashion-user-store")
        .unwrap()
        .unwrap();
    assert_eq!(record["state"]["wishlist"][0]["name"], "Scarf");
}

#[tokio::test]
async fn test_visual_search_through_context() {
    let context = AppContext::in_memory();
    let results = VisualSearch::new(context.ui().clone())
        .with_delay(Duration::ZERO)
        .search("blob:look")
        .await;
    assert_eq!(results.len(), 6);
    assert!(!context.ui().is_loading("visualSearch"));
}

#[tokio::test(start_paused = true)]
async fn test_autosave_flushes_deferred_stores() {
    let storage = Arc::new(MemoryStateStorage::new());
    let options = StoreOptions::new(Arc::new(SequentialIds::default()))
        .with_persist_mode(PersistMode::Deferred);
    let context = AppContext::open(storage.clone(), options);

    let handle = spawn_autosave(context.clone(), Duration::from_millis(100));

    context.ui().toggle_theme();
    assert!(storage.is_empty());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(storage.raw("ai-fashion-ui-store").is_some());
    assert!(!context.is_dirty());

    context.experience().change_vr_room("runway");
    handle.shutdown().await;
    assert!(storage.raw("ai-fashion-experience-store").is_some());
    assert!(!context.is_dirty());
}
