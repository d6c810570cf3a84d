//! Strategy Gateway Port - interface to the strategy suggestion backend.
//!
//! The gateway abstracts whichever service produces strategy suggestions
//! (an LLM behind an edge function, a hosted model, a canned mock) so the
//! conversation flow never couples to a specific vendor.

use async_trait::async_trait;

use crate::domain::case::CaseDetails;

/// Port for requesting strategy suggestions.
///
/// Implementations connect to an external suggestion service and translate
/// between its wire format and these types.
#[async_trait]
pub trait StrategyGateway: Send + Sync {
    /// Requests one strategy suggestion for the given message and case.
    async fn request_strategy(
        &self,
        request: StrategyRequest,
    ) -> Result<StrategyReply, GatewayError>;
}

/// A single suggestion request.
#[derive(Debug, Clone)]
pub struct StrategyRequest {
    /// The counselor's question or prompt.
    pub message: String,
    /// Case context the suggestion should draw on, when available.
    pub case_details: Option<CaseDetails>,
}

impl StrategyRequest {
    /// Creates a request with no case context.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            case_details: None,
        }
    }

    /// Attaches case context to the request.
    pub fn with_case(mut self, case_details: CaseDetails) -> Self {
        self.case_details = Some(case_details);
        self
    }
}

/// A successful gateway reply.
#[derive(Debug, Clone)]
pub struct StrategyReply {
    /// Raw suggestion text, possibly carrying section headers.
    pub response: String,
}

impl StrategyReply {
    /// Creates a reply from raw text.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Rate limited by the upstream service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Upstream service is unavailable.
    #[error("gateway unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to parse the upstream response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited { .. }
                | GatewayError::Unavailable { .. }
                | GatewayError::Network(_)
                | GatewayError::Timeout { .. }
        )
    }
}
