//! Snapshot records with a generated id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::EntityId;

/// Free-form product or notification fields, copied at add time.
pub type Fields = Map<String, Value>;

/// An appended entry: a generated id plus a snapshot of arbitrary fields.
///
/// Cart and wishlist entries and UI notifications are records. They are
/// snapshots, not references: nothing ties a cart entry back to a catalog.
/// Serialized flat, e.g. `{"id": 1700000000000, "name": "Jacket", "price": 199.99}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Builds a record, discarding any caller-supplied `id` field.
    pub fn new(id: EntityId, mut fields: Fields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }
}

/// Builds [`Fields`] from a `serde_json::json!` object literal.
///
/// Non-object values produce an empty field map.
pub fn fields_from(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}
