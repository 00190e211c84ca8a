//! Canned AI stylist replies driven by keyword matching.

use fashion_core::EntityId;
use fashion_core::stylist::{Sender, StylistStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Reply family chosen from the user's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Greeting,
    Occasion,
    Style,
    Default,
}

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const OCCASION_KEYWORDS: &[&str] = &["party", "work", "date", "casual"];
const STYLE_KEYWORDS: &[&str] = &["classic", "trendy", "elegant", "comfortable"];

const GREETING_REPLIES: &[&str] = &[
    "Hello! I'm your AI fashion stylist. I'd love to help you create the perfect look! What's the occasion?",
    "Hi there! Ready to elevate your style? Tell me what you're looking for today.",
    "Welcome to your personal fashion consultation! What can I help you with?",
];
const OCCASION_REPLIES: &[&str] = &[
    "Perfect! For that occasion, I'd recommend starting with a base piece that reflects your personal style. What colors do you feel most confident in?",
    "Great choice! Let's build an outfit that makes you feel amazing. What's your preferred style - classic, trendy, or something in between?",
    "Excellent! I have some fantastic ideas for that. What's your budget range for this outfit?",
];
const STYLE_REPLIES: &[&str] = &[
    "I love that style direction! Let me suggest some pieces that will complement your aesthetic perfectly.",
    "Perfect! That style is so versatile. I can see it working beautifully with some key accessories.",
    "Great taste! That style really suits you. Let me recommend some pieces that will enhance your natural elegance.",
];
const DEFAULT_REPLIES: &[&str] = &[
    "That's interesting! Tell me more about what you're looking for in terms of style and comfort.",
    "I'd love to help you with that! What specific aspects of fashion would you like to explore?",
    "Fascinating! Let me understand your style preferences better. What colors and patterns do you gravitate towards?",
];

impl ReplyCategory {
    /// Case-insensitive substring match, checked in declaration order, so
    /// "this" counts as a greeting.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if matches(GREETING_KEYWORDS) {
            ReplyCategory::Greeting
        } else if matches(OCCASION_KEYWORDS) {
            ReplyCategory::Occasion
        } else if matches(STYLE_KEYWORDS) {
            ReplyCategory::Style
        } else {
            ReplyCategory::Default
        }
    }

    pub fn replies(self) -> &'static [&'static str] {
        match self {
            ReplyCategory::Greeting => GREETING_REPLIES,
            ReplyCategory::Occasion => OCCASION_REPLIES,
            ReplyCategory::Style => STYLE_REPLIES,
            ReplyCategory::Default => DEFAULT_REPLIES,
        }
    }
}

/// Result of one [`StylistChat::send`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub conversation_id: EntityId,
    pub user_message_id: EntityId,
    pub reply_id: EntityId,
    pub category: ReplyCategory,
    pub reply: String,
}

/// Local stand-in for the stylist model.
pub struct StylistChat {
    stylist: Arc<StylistStore>,
    rng: Mutex<StdRng>,
}

impl StylistChat {
    pub fn new(stylist: Arc<StylistStore>) -> Self {
        Self {
            stylist,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic reply selection.
    pub fn with_seed(stylist: Arc<StylistStore>, seed: u64) -> Self {
        Self {
            stylist,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, category: ReplyCategory) -> &'static str {
        let replies = category.replies();
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        replies.choose(&mut *rng).copied().unwrap_or(DEFAULT_REPLIES[0])
    }

    /// Sends `text` to the current conversation, starting one when none is
    /// selected, and appends the stylist's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&self, text: &str) -> Option<ChatExchange> {
        if text.trim().is_empty() {
            return None;
        }

        let conversation_id = match self.stylist.select(|s| s.current_conversation) {
            Some(id) => id,
            None => self.stylist.start_new_conversation().id,
        };

        let user_message_id = self.stylist.add_message(conversation_id, text, Sender::User)?;

        let category = ReplyCategory::classify(text);
        let reply = self.pick(category);
        let reply_id = self.stylist.add_message(conversation_id, reply, Sender::Ai)?;
        debug!(conversation = %conversation_id, ?category, "Stylist replied");

        Some(ChatExchange {
            conversation_id,
            user_message_id,
            reply_id,
            category,
            reply: reply.to_string(),
        })
    }
}
