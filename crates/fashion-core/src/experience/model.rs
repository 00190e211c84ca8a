//! Experience sub-trees and their partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::id::EntityId;
use crate::record::Fields;

/// A frame captured from the AR camera preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedImage {
    pub id: EntityId,
    /// Encoded image, typically a `data:image/png;base64,...` URL.
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArState {
    pub is_active: bool,
    pub selected_outfit: Option<Value>,
    pub body_measurements: BTreeMap<String, f64>,
    pub captured_images: Vec<CapturedImage>,
    pub is_recording: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VrState {
    pub current_room: String,
    pub active_users: u32,
    pub selected_products: Vec<Value>,
    pub events: Vec<Value>,
}

impl Default for VrState {
    fn default() -> Self {
        Self {
            current_room: "main".to_string(),
            active_users: 0,
            selected_products: Vec::new(),
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarState {
    pub current_avatar: Option<Value>,
    pub customizations: Fields,
    pub measurements: BTreeMap<String, f64>,
    pub saved_avatars: Vec<Value>,
}

/// Shallow partial update of [`ArState`]. Captured images are only appended
/// through the capture action, never replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArUpdate {
    pub is_active: Option<bool>,
    pub selected_outfit: Option<Option<Value>>,
    pub body_measurements: Option<BTreeMap<String, f64>>,
    pub is_recording: Option<bool>,
}

impl ArUpdate {
    pub fn apply(self, ar: &ArState) -> ArState {
        ArState {
            is_active: self.is_active.unwrap_or(ar.is_active),
            selected_outfit: self
                .selected_outfit
                .unwrap_or_else(|| ar.selected_outfit.clone()),
            body_measurements: self
                .body_measurements
                .unwrap_or_else(|| ar.body_measurements.clone()),
            captured_images: ar.captured_images.clone(),
            is_recording: self.is_recording.unwrap_or(ar.is_recording),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VrUpdate {
    pub current_room: Option<String>,
    pub active_users: Option<u32>,
    pub selected_products: Option<Vec<Value>>,
    pub events: Option<Vec<Value>>,
}

impl VrUpdate {
    pub fn apply(self, vr: &VrState) -> VrState {
        VrState {
            current_room: self.current_room.unwrap_or_else(|| vr.current_room.clone()),
            active_users: self.active_users.unwrap_or(vr.active_users),
            selected_products: self
                .selected_products
                .unwrap_or_else(|| vr.selected_products.clone()),
            events: self.events.unwrap_or_else(|| vr.events.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvatarUpdate {
    pub current_avatar: Option<Option<Value>>,
    pub customizations: Option<Fields>,
    pub measurements: Option<BTreeMap<String, f64>>,
    pub saved_avatars: Option<Vec<Value>>,
}

impl AvatarUpdate {
    pub fn apply(self, avatar: &AvatarState) -> AvatarState {
        AvatarState {
            current_avatar: self
                .current_avatar
                .unwrap_or_else(|| avatar.current_avatar.clone()),
            customizations: self
                .customizations
                .unwrap_or_else(|| avatar.customizations.clone()),
            measurements: self
                .measurements
                .unwrap_or_else(|| avatar.measurements.clone()),
            saved_avatars: self
                .saved_avatars
                .unwrap_or_else(|| avatar.saved_avatars.clone()),
        }
    }
}
