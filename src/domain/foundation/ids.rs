//! Identifier newtypes shared across the domain.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Identifier of a mediation case.
///
/// Case IDs come from the dashboard's case registry and are opaque here;
/// the only invariant enforced is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Creates a case ID from an externally supplied string.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the value is empty or whitespace only
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("case_id", "Case ID cannot be empty"));
        }
        Ok(Self(value))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
