//! AskStrategy command handler.
//!
//! Handles a single stateless strategy question: validate, call the
//! gateway, and format the reply for display. The HTTP surface uses this
//! directly; multi-turn retry logic lives in [`super::StrategyAssistant`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::case::CaseDetails;
use crate::domain::strategy::{format_response, FormattedContent};
use crate::ports::{GatewayError, StrategyGateway, StrategyRequest};

/// Command to ask the assistant one strategy question.
#[derive(Debug, Clone)]
pub struct AskStrategyCommand {
    /// The counselor's question.
    pub message: String,
    /// Case context, when the dashboard supplies it.
    pub case_details: Option<CaseDetails>,
}

impl AskStrategyCommand {
    /// Creates a command with no case context.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            case_details: None,
        }
    }

    /// Attaches case context.
    pub fn with_case(mut self, case_details: CaseDetails) -> Self {
        self.case_details = Some(case_details);
        self
    }
}

/// Errors that can occur when asking a strategy question.
#[derive(Debug, Error)]
pub enum AskStrategyError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result of asking a strategy question.
#[derive(Debug, Clone)]
pub struct AskStrategyResult {
    /// Raw suggestion text.
    pub response: String,
    /// The suggestion split into display sections.
    pub formatted: FormattedContent,
}

/// Handler for one-shot strategy questions.
pub struct AskStrategyHandler {
    gateway: Arc<dyn StrategyGateway>,
}

impl AskStrategyHandler {
    /// Creates a handler backed by the given gateway.
    pub fn new(gateway: Arc<dyn StrategyGateway>) -> Self {
        Self { gateway }
    }

    /// Handles the command.
    #[instrument(skip(self, command), fields(has_case = command.case_details.is_some()))]
    pub async fn handle(
        &self,
        command: AskStrategyCommand,
    ) -> Result<AskStrategyResult, AskStrategyError> {
        if command.message.trim().is_empty() {
            return Err(AskStrategyError::EmptyMessage);
        }

        let mut request = StrategyRequest::new(command.message);
        if let Some(case) = command.case_details {
            request = request.with_case(case);
        }

        let reply = self.gateway.request_strategy(request).await?;
        debug!(response_len = reply.response.len(), "gateway reply received");

        let formatted = format_response(&reply.response);
        Ok(AskStrategyResult {
            response: reply.response,
            formatted,
        })
    }
}
