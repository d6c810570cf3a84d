//! Strategy assistant HTTP surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::StrategyAppState;
pub use routes::{strategy_router, strategy_routes};
