//! Timeline events attached to a mediation case.

use serde::{Deserialize, Serialize};

/// A single event on a case timeline.
///
/// Timeline data is owned by the dashboard's case registry; the assistant
/// only reads it to build request context, so dates stay as the wire
/// strings the front end sends (often date-only, not full RFC 3339).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Unique identifier within the case.
    pub id: String,
    /// Short event title.
    pub title: String,
    /// What happened.
    pub description: String,
    /// When it happened, as supplied by the front end.
    pub date: String,
    /// Optional category tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Stakeholder the event concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakeholder: Option<String>,
}

impl TimelineEvent {
    /// Renders the event as one line of prompt context.
    ///
    /// Format: `- {date}: {title} ({stakeholder|Unknown}) - {description}`
    pub fn to_context_line(&self) -> String {
        format!(
            "- {}: {} ({}) - {}",
            self.date,
            self.title,
            self.stakeholder.as_deref().unwrap_or("Unknown"),
            self.description
        )
    }
}
