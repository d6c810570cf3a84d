//! HTTP adapters.

pub mod strategy;
