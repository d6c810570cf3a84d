//! Chat messages exchanged with the strategy assistant.
//!
//! Messages are immutable records of counselor/assistant exchanges. Each
//! message has a sender, content, creation timestamp, and, for assistant
//! replies, the structured content derived from the raw text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp};

use super::formatter::FormattedContent;

/// Unique identifier for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random MessageId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The counselor (or stakeholder) at the keyboard.
    User,
    /// The strategy assistant.
    Assistant,
}

/// An immutable message in one strategy conversation.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-empty (validated at construction)
/// - no field changes after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: MessageId,
    sender: Sender,
    content: String,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_content: Option<FormattedContent>,
}

impl ChatMessage {
    /// Creates a user message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or whitespace only
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::User, content, None)
    }

    /// Creates an assistant message carrying its structured content.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or whitespace only
    pub fn assistant(
        content: impl Into<String>,
        formatted_content: FormattedContent,
    ) -> Result<Self, DomainError> {
        Self::new(Sender::Assistant, content, Some(formatted_content))
    }

    /// Creates a plain assistant message (greeting, fallback advisory).
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or whitespace only
    pub fn assistant_plain(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Assistant, content, None)
    }

    fn new(
        sender: Sender,
        content: impl Into<String>,
        formatted_content: Option<FormattedContent>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            sender,
            content,
            timestamp: Timestamp::now(),
            formatted_content,
        })
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the sender.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns the structured content, if any.
    pub fn formatted_content(&self) -> Option<&FormattedContent> {
        self.formatted_content.as_ref()
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::formatter::format_response;

    mod message_id {
        use super::*;

        #[test]
        fn generates_unique_values() {
            let id1 = MessageId::new();
            let id2 = MessageId::new();
            assert_ne!(id1, id2);
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn user_creates_user_message() {
            let msg = ChatMessage::user("How should I open the session?").unwrap();
            assert!(msg.is_user());
            assert!(!msg.is_assistant());
            assert!(msg.formatted_content().is_none());
        }

        #[test]
        fn assistant_carries_formatted_content() {
            let raw = "STRATEGY OVERVIEW: Use empathy.\nMEDIATION PROCESS:\n1. Talk";
            let msg = ChatMessage::assistant(raw, format_response(raw)).unwrap();

            assert!(msg.is_assistant());
            let formatted = msg.formatted_content().unwrap();
            assert_eq!(formatted.overview.as_deref(), Some("Use empathy."));
        }

        #[test]
        fn assistant_plain_has_no_formatted_content() {
            let msg = ChatMessage::assistant_plain("Hello counselor").unwrap();
            assert!(msg.is_assistant());
            assert!(msg.formatted_content().is_none());
        }

        #[test]
        fn rejects_empty_content() {
            assert!(ChatMessage::user("").is_err());
            assert!(ChatMessage::user("   \n\t").is_err());
        }

        #[test]
        fn sets_timestamp() {
            let msg = ChatMessage::user("Hello").unwrap();
            let now = Timestamp::now();
            assert!(msg.timestamp().as_datetime() <= now.as_datetime());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn sender_serializes_to_snake_case() {
            assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
            assert_eq!(
                serde_json::to_string(&Sender::Assistant).unwrap(),
                "\"assistant\""
            );
        }

        #[test]
        fn message_uses_camel_case_field_names() {
            let raw = "STRATEGY OVERVIEW: x";
            let msg = ChatMessage::assistant(raw, format_response(raw)).unwrap();
            let json = serde_json::to_string(&msg).unwrap();

            assert!(json.contains("formattedContent"));
            assert!(json.contains("rawContent"));
        }
    }
}
