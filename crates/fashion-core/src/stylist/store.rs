//! Stylist store: conversation history and styling context.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::model::{Conversation, Message, Sender};
use crate::id::EntityId;
use crate::record::Fields;
use crate::store::{Domain, Store};

/// Full stylist domain state.
///
/// `current_conversation` is always `None` or the id of an entry in
/// `conversations`. It is not persisted: a fresh launch starts with no
/// conversation selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylistState {
    pub conversations: Vec<Conversation>,
    pub current_conversation: Option<EntityId>,
    pub current_mood: String,
    pub current_occasion: String,
    pub style_context: Fields,
}

impl StylistState {
    pub fn conversation(&self, id: EntityId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current_conversation.and_then(|id| self.conversation(id))
    }
}

/// Persisted layout of the `stylist-store` record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedStylist {
    pub conversations: Vec<Conversation>,
    pub current_mood: String,
    pub current_occasion: String,
    pub style_context: Fields,
}

#[derive(Debug, Clone)]
pub enum StylistAction {
    /// Appends the conversation and makes it current.
    StartConversation(Conversation),
    AddMessage {
        conversation_id: EntityId,
        message: Message,
    },
    /// Selects an existing conversation, or clears the selection with `None`.
    SelectConversation(Option<EntityId>),
    DeleteConversation(EntityId),
    SetMood(String),
    SetOccasion(String),
    /// Shallow-merges keys into the style context.
    UpdateStyleContext(Fields),
}

pub struct StylistDomain;

impl Domain for StylistDomain {
    type State = StylistState;
    type Action = StylistAction;
    type Persisted = PersistedStylist;

    const NAME: &'static str = "stylist-store";

    fn reduce(state: &StylistState, action: StylistAction) -> StylistState {
        let mut next = state.clone();
        match action {
            StylistAction::StartConversation(conversation) => {
                next.current_conversation = Some(conversation.id);
                next.conversations.push(conversation);
            }
            StylistAction::AddMessage {
                conversation_id,
                message,
            } => {
                if let Some(conversation) = next
                    .conversations
                    .iter_mut()
                    .find(|c| c.id == conversation_id)
                {
                    conversation.messages.push(message);
                }
            }
            StylistAction::SelectConversation(Some(id)) => {
                if state.conversation(id).is_some() {
                    next.current_conversation = Some(id);
                }
            }
            StylistAction::SelectConversation(None) => next.current_conversation = None,
            StylistAction::DeleteConversation(id) => {
                next.conversations.retain(|c| c.id != id);
                if next.current_conversation == Some(id) {
                    next.current_conversation = None;
                }
            }
            StylistAction::SetMood(mood) => next.current_mood = mood,
            StylistAction::SetOccasion(occasion) => next.current_occasion = occasion,
            StylistAction::UpdateStyleContext(context) => next.style_context.extend(context),
        }
        next
    }

    fn partialize(state: &StylistState) -> PersistedStylist {
        PersistedStylist {
            conversations: state.conversations.clone(),
            current_mood: state.current_mood.clone(),
            current_occasion: state.current_occasion.clone(),
            style_context: state.style_context.clone(),
        }
    }

    fn restore(persisted: PersistedStylist) -> StylistState {
        StylistState {
            conversations: persisted.conversations,
            current_conversation: None,
            current_mood: persisted.current_mood,
            current_occasion: persisted.current_occasion,
            style_context: persisted.style_context,
        }
    }

    fn max_id(state: &StylistState) -> Option<EntityId> {
        state
            .conversations
            .iter()
            .flat_map(|c| std::iter::once(c.id).chain(c.messages.iter().map(|m| m.id)))
            .max()
    }
}

pub type StylistStore = Store<StylistDomain>;

impl Store<StylistDomain> {
    /// Starts an empty conversation tagged with the current mood and occasion,
    /// makes it current, and returns it.
    pub fn start_new_conversation(&self) -> Conversation {
        let (mood, occasion) = self.select(|s| (s.current_mood.clone(), s.current_occasion.clone()));
        let conversation = Conversation {
            id: self.next_id(),
            messages: Vec::new(),
            started_at: Utc::now(),
            mood,
            occasion,
        };
        self.dispatch(StylistAction::StartConversation(conversation.clone()));
        conversation
    }

    /// Appends a message to `conversation_id`.
    ///
    /// Returns the new message id, or `None` when no such conversation exists
    /// (in which case nothing changes).
    pub fn add_message(
        &self,
        conversation_id: EntityId,
        text: impl Into<String>,
        sender: Sender,
    ) -> Option<EntityId> {
        let message = Message {
            id: self.next_id(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        };
        let id = message.id;
        let state = self.dispatch(StylistAction::AddMessage {
            conversation_id,
            message,
        });

        state
            .conversation(conversation_id)
            .filter(|c| c.messages.iter().any(|m| m.id == id))
            .map(|_| id)
    }

    /// Makes `id` the current conversation. Returns false for unknown ids.
    pub fn select_conversation(&self, id: EntityId) -> bool {
        let state = self.dispatch(StylistAction::SelectConversation(Some(id)));
        state.current_conversation == Some(id)
    }

    pub fn clear_current_conversation(&self) {
        self.dispatch(StylistAction::SelectConversation(None));
    }

    pub fn delete_conversation(&self, id: EntityId) {
        self.dispatch(StylistAction::DeleteConversation(id));
    }

    pub fn set_current_mood(&self, mood: impl Into<String>) {
        self.dispatch(StylistAction::SetMood(mood.into()));
    }

    pub fn set_current_occasion(&self, occasion: impl Into<String>) {
        self.dispatch(StylistAction::SetOccasion(occasion.into()));
    }

    pub fn update_style_context(&self, context: Fields) {
        self.dispatch(StylistAction::UpdateStyleContext(context));
    }

    pub fn current_conversation(&self) -> Option<Conversation> {
        self.select(|s| s.current().cloned())
    }

    /// Messages of the current conversation, empty when none is selected.
    pub fn current_messages(&self) -> Vec<Message> {
        self.select(|s| s.current().map(|c| c.messages.clone()).unwrap_or_default())
    }
}
