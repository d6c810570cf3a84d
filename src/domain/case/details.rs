//! Case details as supplied by the dashboard.
//!
//! The strategy assistant treats this as read-only request context: it is
//! deserialized from the front end, folded into the gateway prompt, and
//! never validated or mutated here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CaseId;

use super::timeline::TimelineEvent;

/// Lifecycle status of a mediation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

/// Cynefin sense-making classification attached to a case.
///
/// Opaque metadata from the counselor's assessment; the assistant never
/// computes or second-guesses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CynefinDomain {
    Clear,
    Complicated,
    Complex,
    Chaotic,
}

impl CynefinDomain {
    /// Returns the display label used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            CynefinDomain::Clear => "Clear",
            CynefinDomain::Complicated => "Complicated",
            CynefinDomain::Complex => "Complex",
            CynefinDomain::Chaotic => "Chaotic",
        }
    }
}

impl std::fmt::Display for CynefinDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaseStatus::New => "New",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::Resolved => "Resolved",
        };
        write!(f, "{}", s)
    }
}

/// Full case context sent with a strategy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    /// Case identifier from the dashboard.
    pub id: CaseId,
    /// Case title.
    pub title: String,
    /// Names of the involved parties (students, parents, staff).
    pub stakeholders: Vec<String>,
    /// Lifecycle status.
    pub status: CaseStatus,
    /// Creation date as supplied by the front end.
    pub date_created: String,
    /// Ordered timeline of events.
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    /// Counselor's Cynefin classification.
    pub cynefin_domain: CynefinDomain,
    /// Free-text rationale for the classification.
    pub cynefin_rationale: String,
}
