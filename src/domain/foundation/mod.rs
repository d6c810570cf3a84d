//! Foundation types shared by every domain module.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::CaseId;
pub use timestamp::Timestamp;
