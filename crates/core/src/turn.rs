//! Turn and session identity value objects.
//!
//! A turn is the atomic unit of conversation history: one user message or
//! one assistant reply, stored together with its provider-reported token
//! cost. Turns are never mutated in place — the window only appends them or
//! drops them en masse from the front.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the conversation window: text plus its token cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The message or reply text.
    pub content: String,

    /// Token cost attributed to this entry by the provider's accounting.
    pub cost: u32,
}

impl Turn {
    pub fn new(content: impl Into<String>, cost: u32) -> Self {
        Self {
            content: content.into(),
            cost,
        }
    }
}
