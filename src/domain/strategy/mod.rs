//! Strategy assistant conversation domain.

mod conversation;
mod formatter;
mod message;

pub use conversation::{
    Conversation, FailureOutcome, FALLBACK_MESSAGE, MAX_RETRIES, OPENING_MESSAGE,
    SIMPLIFIED_RETRY_PROMPT,
};
pub use formatter::{format_response, FormattedContent};
pub use message::{ChatMessage, MessageId, Sender};
