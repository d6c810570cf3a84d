//! Ports: interfaces the application layer depends on.
//!
//! Adapters implement these traits; the domain and application layers only
//! see the trait, never the concrete integration.

mod notifier;
mod strategy_gateway;

pub use notifier::Notifier;
pub use strategy_gateway::{GatewayError, StrategyGateway, StrategyReply, StrategyRequest};
