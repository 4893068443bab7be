use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transient bot message shown while a request is in flight
pub const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One chat message; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }
}

/// Append-only message log
///
/// The one exception is the thinking placeholder, which is retracted when the
/// request it stands for finishes, and only while it is still the last message.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    thinking: Option<Uuid>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id
    pub fn push(&mut self, message: Message) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> Uuid {
        self.push(Message::user(content))
    }

    pub fn push_bot(&mut self, content: impl Into<String>) -> Uuid {
        self.push(Message::bot(content))
    }

    /// Append the thinking placeholder unless one is already showing
    pub fn begin_thinking(&mut self) {
        if self.thinking.is_none() {
            self.thinking = Some(self.push_bot(THINKING));
        }
    }

    /// Drop the thinking placeholder; returns whether it was removed
    pub fn retract_thinking(&mut self) -> bool {
        let Some(id) = self.thinking.take() else {
            return false;
        };
        if self.messages.last().is_some_and(|m| m.id == id) {
            self.messages.pop();
            true
        } else {
            log::debug!("Thinking placeholder is no longer the last message; leaving it");
            false
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages appended after the first `from`
    pub fn since(&self, from: usize) -> &[Message] {
        self.messages.get(from..).unwrap_or(&[])
    }
}
