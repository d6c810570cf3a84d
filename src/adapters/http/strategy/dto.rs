//! Wire types for the strategy assistant endpoint.
//!
//! Field names match the dashboard's JSON (camelCase). The error body is
//! the flat `{error}` shape the front end already parses.

use serde::{Deserialize, Serialize};

use crate::domain::case::CaseDetails;

/// Request body for POST /api/strategy-assistant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskStrategyRequest {
    /// The counselor's question.
    pub message: String,
    /// Case context, when the dashboard has it loaded.
    #[serde(default)]
    pub case_details: Option<CaseDetails>,
}

/// Success body: the raw suggestion text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskStrategyResponse {
    pub response: String,
}

/// Failure body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body for GET /api/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
