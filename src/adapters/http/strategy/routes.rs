//! Axum routes for the strategy assistant.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{ask_strategy, health, StrategyAppState};

/// Creates routes for strategy assistant endpoints.
///
/// - POST /strategy-assistant - request one strategy suggestion
/// - GET /health - liveness probe
pub fn strategy_routes() -> Router<StrategyAppState> {
    Router::new()
        .route("/strategy-assistant", post(ask_strategy))
        .route("/health", get(health))
}

/// Combined router with all strategy routes under /api.
pub fn strategy_router() -> Router<StrategyAppState> {
    Router::new().nest("/api", strategy_routes())
}
