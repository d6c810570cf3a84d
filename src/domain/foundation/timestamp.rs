//! UTC timestamps for server-created instants.
//!
//! Case dates arriving from the dashboard stay as wire strings; this type
//! is only for moments the server itself records, such as when a chat
//! message was created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable UTC instant, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Captures the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing instant.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Returns the inner instant.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Timestamp {
        let instant = DateTime::parse_from_rfc3339("2026-03-09T14:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Timestamp::from_datetime(instant)
    }

    #[test]
    fn now_is_monotone_under_ord() {
        let earlier = Timestamp::now();
        let later = Timestamp::now();
        assert!(earlier <= later);
    }

    #[test]
    fn round_trips_through_json() {
        let ts = fixed();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn displays_as_rfc3339() {
        assert_eq!(fixed().to_string(), "2026-03-09T14:05:00+00:00");
    }
}
