//! Command handlers.

pub mod strategy;
