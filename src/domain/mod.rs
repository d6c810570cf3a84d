//! Domain layer: pure types and logic with no I/O.

pub mod case;
pub mod foundation;
pub mod session;
pub mod strategy;
