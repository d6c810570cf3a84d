//! Mediation case context.

mod details;
mod timeline;

pub use details::{CaseDetails, CaseStatus, CynefinDomain};
pub use timeline::TimelineEvent;
