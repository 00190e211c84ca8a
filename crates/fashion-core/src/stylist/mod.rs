//! AI stylist conversation domain.

mod model;
mod store;

pub use model::{Conversation, Message, Sender};
pub use store::{PersistedStylist, StylistAction, StylistDomain, StylistState, StylistStore};
