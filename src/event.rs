//! Message events and replies exchanged with the host framework.
//!
//! The host framework dispatches inbound chat messages as [`MessageEvent`]s. A plugin that wants
//! to answer hands back a [`Reply`], which also tells the host whether to skip its default
//! handling of the message.

/// The conversational scope an inbound message was received in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    /// A direct, person-to-person conversation.
    Person,
    /// A group conversation.
    Group,
}

/// A plain text chat message received from the host framework.
#[derive(Clone, Debug)]
pub struct MessageEvent {
    /// The message text.
    pub text: String,
    /// The scope the message was received in.
    pub scope: Scope,
}

impl MessageEvent {
    /// Creates a new message event.
    pub fn new(text: impl Into<String>, scope: Scope) -> MessageEvent {
        MessageEvent {
            text: text.into(),
            scope,
        }
    }
}

/// A reply to hand back to the host framework.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    /// The reply text.
    pub text: String,
    /// When set, the host framework skips its default handling of the message.
    pub suppress_default: bool,
}

impl Reply {
    /// Creates a reply that suppresses the host framework's default handling.
    pub fn suppressing(text: impl Into<String>) -> Reply {
        Reply {
            text: text.into(),
            suppress_default: true,
        }
    }
}
