//! Conversation and message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A single chat message.
///
/// Timestamps are stored as RFC 3339 strings and restored as `DateTime<Utc>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// A stylist conversation, tagged with the mood and occasion current when it started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: EntityId,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub occasion: String,
}

impl Conversation {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_message_timestamp_round_trips() {
        let message = Message {
            id: EntityId(1),
            text: "hi".to_string(),
            sender: Sender::User,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["sender"], json!("user"));
        assert!(value["timestamp"].as_str().unwrap().starts_with("2024-05-01T12:30:00"));

        let back: Message = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
        assert!(back.timestamp < Utc::now());
    }

    #[test]
    fn test_conversation_uses_camel_case() {
        let conversation: Conversation = serde_json::from_value(json!({
            "id": 5,
            "startedAt": "2024-05-01T12:30:00Z",
            "mood": "confident"
        }))
        .unwrap();
        assert!(conversation.messages.is_empty());
        assert_eq!(conversation.mood, "confident");
        assert!(conversation.last_message().is_none());
    }
}
