//! Server entrypoint: configuration, logging, wiring, and serve loop.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use secrecy::ExposeSecret;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mediation_desk::adapters::ai::{OpenAiConfig, OpenAiGateway};
use mediation_desk::adapters::http::strategy::{strategy_router, StrategyAppState};
use mediation_desk::application::handlers::strategy::AskStrategyHandler;
use mediation_desk::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    info!(
        environment = ?config.server.environment,
        model = %config.ai.model,
        max_retries = config.ai.max_retries,
        "starting mediation-desk"
    );

    let api_key = config
        .ai
        .openai_api_key
        .as_ref()
        .expect("validated above")
        .expose_secret()
        .clone();

    let gateway = OpenAiGateway::new(
        OpenAiConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_timeout(config.ai.timeout()),
    );

    let handler = AskStrategyHandler::new(Arc::new(gateway));
    let state = StrategyAppState::new(Arc::new(handler));

    let router = strategy_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr()?;
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.server.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.allowed_origins();
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        // The original edge function answered preflight with a wildcard.
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(parsed)
    }
}
