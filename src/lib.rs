//! Mediation Desk - Case management for school conflict mediation
//!
//! This crate implements the AI strategy assistant behind the mediation
//! dashboard: structured parsing of assistant replies into display sections
//! and the conversation flow that drives the strategy gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
