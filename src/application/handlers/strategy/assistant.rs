//! Strategy assistant session orchestrator.
//!
//! Drives one conversation: pushes the user message into the history,
//! calls the gateway, and on failure applies the bounded retry policy
//! (simplified prompt, then fallback advisory plus a single user-facing
//! warning). All state transitions live in the domain
//! [`Conversation`]; this type just supplies the I/O.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::case::CaseDetails;
use crate::domain::foundation::DomainError;
use crate::domain::session::Session;
use crate::domain::strategy::{
    ChatMessage, Conversation, FailureOutcome, SIMPLIFIED_RETRY_PROMPT,
};
use crate::ports::{Notifier, StrategyGateway, StrategyRequest};

/// Warning surfaced once when retries are exhausted.
const EXHAUSTED_WARNING: &str =
    "Failed to get AI response. The system will provide a fallback response.";

/// One counselor chat session with the strategy assistant.
pub struct StrategyAssistant {
    gateway: Arc<dyn StrategyGateway>,
    notifier: Arc<dyn Notifier>,
    conversation: Conversation,
    case_details: Option<CaseDetails>,
    session: Option<Session>,
}

impl StrategyAssistant {
    /// Creates a session with no case context.
    pub fn new(gateway: Arc<dyn StrategyGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            conversation: Conversation::new(),
            case_details: None,
            session: None,
        }
    }

    /// Attaches the active dashboard session, used for log attribution.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Attaches case context included with every gateway request.
    pub fn with_case(mut self, case_details: CaseDetails) -> Self {
        self.case_details = Some(case_details);
        self
    }

    /// Overrides the retry bound (defaults to [`crate::domain::strategy::MAX_RETRIES`]).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.conversation = self.conversation.with_max_retries(max_retries);
        self
    }

    /// Sends a counselor message and drives the exchange to completion.
    ///
    /// Every call leaves the conversation settled: either an assistant
    /// reply or the fallback advisory has been appended, and loading is
    /// clear. Whitespace-only text is a no-op.
    #[instrument(skip_all, fields(user = self.session.as_ref().map(Session::name)))]
    pub async fn send_message(&mut self, text: &str) -> Result<(), DomainError> {
        if !self.conversation.submit_user(text)? {
            return Ok(());
        }

        let mut prompt = text.to_string();
        loop {
            let mut request = StrategyRequest::new(prompt.clone());
            if let Some(case) = &self.case_details {
                request = request.with_case(case.clone());
            }

            match self.gateway.request_strategy(request).await {
                Ok(reply) => {
                    self.conversation.record_reply(&reply.response);
                    return Ok(());
                }
                Err(err) => {
                    warn!(error = %err, "strategy gateway request failed");
                    match self.conversation.record_failure() {
                        FailureOutcome::Retry { attempt } => {
                            info!(attempt, "retrying with simplified prompt");
                            prompt = SIMPLIFIED_RETRY_PROMPT.to_string();
                        }
                        FailureOutcome::Fallback => {
                            self.notifier.warn(EXHAUSTED_WARNING);
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Returns the conversation transcript.
    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// Returns true while a request would still be in flight.
    pub fn is_loading(&self) -> bool {
        self.conversation.is_loading()
    }
}
