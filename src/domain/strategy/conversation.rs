//! Conversation state for one strategy-assistant chat session.
//!
//! The conversation owns the append-only message history, the loading flag,
//! and the bounded retry counter. It is a pure state holder: the gateway
//! round trips are driven by the application layer, which reports outcomes
//! back here. Messages are never edited or removed.

use crate::domain::foundation::DomainError;

use super::formatter::format_response;
use super::message::ChatMessage;

/// Default number of times a failed gateway call is retried before
/// falling back.
pub const MAX_RETRIES: u32 = 2;

/// Fixed greeting that opens every new conversation.
pub const OPENING_MESSAGE: &str = "Hello counselor, I'm your AI Strategy Assistant. \
    I've analyzed this case and can help you develop effective conflict resolution \
    strategies. What would you like to know?";

/// Substitute prompt sent on every retry, regardless of the user's wording.
pub const SIMPLIFIED_RETRY_PROMPT: &str = "Please provide a brief strategy suggestion";

/// Canned advisory appended when retries are exhausted.
pub const FALLBACK_MESSAGE: &str = "I'm sorry, I'm having trouble connecting to my \
    knowledge base right now. Based on what I can see in this case, I would recommend \
    focusing on understanding each student's perspective through individual \
    conversations. Since this appears to be in the Complex domain, consider using \
    mediation techniques that create a safe space for both parties to express \
    themselves without judgment.";

/// Stand-in content for a successful gateway reply that carried no text.
const EMPTY_REPLY_MESSAGE: &str = "I'm sorry, I couldn't generate a response.";

/// What the caller should do after reporting a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Retry with [`SIMPLIFIED_RETRY_PROMPT`]; `attempt` counts from 1.
    Retry { attempt: u32 },
    /// Retries exhausted; the fallback advisory was appended and the
    /// caller should surface its one-time warning now.
    Fallback,
}

/// State of one chat session with the strategy assistant.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    loading: bool,
    retry_count: u32,
    max_retries: u32,
}

impl Conversation {
    /// Opens a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        let greeting = ChatMessage::assistant_plain(OPENING_MESSAGE)
            .expect("opening message is non-empty");
        Self {
            messages: vec![greeting],
            loading: false,
            retry_count: 0,
            max_retries: MAX_RETRIES,
        }
    }

    /// Opens a conversation with no greeting (for restored histories).
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            loading: false,
            retry_count: 0,
            max_retries: MAX_RETRIES,
        }
    }

    /// Overrides the retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Submits user text, appending a user message and entering the
    /// awaiting state.
    ///
    /// Whitespace-only text is a no-op: nothing is appended and no state
    /// changes, signalled by `Ok(false)`.
    pub fn submit_user(&mut self, text: &str) -> Result<bool, DomainError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let message = ChatMessage::user(text)?;
        self.messages.push(message);
        self.loading = true;
        Ok(true)
    }

    /// Records a successful gateway reply.
    ///
    /// The raw text is formatted into display sections and appended as an
    /// assistant message; the retry counter resets and loading clears.
    pub fn record_reply(&mut self, raw: &str) {
        // A successful reply with no text still ends the turn; store the
        // apology the gateway itself uses for missing completions.
        let content = if raw.trim().is_empty() {
            EMPTY_REPLY_MESSAGE
        } else {
            raw
        };
        let message = ChatMessage::assistant(content, format_response(content))
            .expect("reply content is non-empty");
        self.messages.push(message);
        self.retry_count = 0;
        self.loading = false;
    }

    /// Records a gateway failure and decides the next step.
    ///
    /// Below the retry bound the counter advances and the caller should
    /// retry with the simplified prompt; at the bound the fallback advisory
    /// is appended, the counter resets, and the turn ends.
    pub fn record_failure(&mut self) -> FailureOutcome {
        if self.retry_count < self.max_retries {
            self.retry_count += 1;
            FailureOutcome::Retry {
                attempt: self.retry_count,
            }
        } else {
            let fallback = ChatMessage::assistant_plain(FALLBACK_MESSAGE)
                .expect("fallback message is non-empty");
            self.messages.push(fallback);
            self.retry_count = 0;
            self.loading = false;
            FailureOutcome::Fallback
        }
    }

    /// Returns the full message history, in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the last message, if any.
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Returns true while a gateway request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the current retry count.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
