//! HTTP handlers for the strategy assistant endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::application::handlers::strategy::{
    AskStrategyCommand, AskStrategyError, AskStrategyHandler,
};
use crate::ports::GatewayError;

use super::dto::{AskStrategyRequest, AskStrategyResponse, ErrorResponse, HealthResponse};

/// Shared state for strategy handlers.
#[derive(Clone)]
pub struct StrategyAppState {
    pub handler: Arc<AskStrategyHandler>,
}

impl StrategyAppState {
    pub fn new(handler: Arc<AskStrategyHandler>) -> Self {
        Self { handler }
    }
}

/// POST /api/strategy-assistant - request one strategy suggestion.
///
/// # Errors
/// - 400 Bad Request: empty message
/// - 429 Too Many Requests: upstream rate limit
/// - 502 Bad Gateway: upstream failure
/// - 504 Gateway Timeout: upstream timeout
pub async fn ask_strategy(
    State(state): State<StrategyAppState>,
    Json(request): Json<AskStrategyRequest>,
) -> Result<impl IntoResponse, StrategyApiError> {
    let mut command = AskStrategyCommand::new(request.message);
    if let Some(case) = request.case_details {
        command = command.with_case(case);
    }

    let result = state.handler.handle(command).await?;

    Ok((
        StatusCode::OK,
        Json(AskStrategyResponse {
            response: result.response,
        }),
    ))
}

/// GET /api/health - liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

/// API-level errors with their HTTP mapping.
#[derive(Debug)]
pub enum StrategyApiError {
    BadRequest(String),
    RateLimited(String),
    GatewayTimeout(String),
    BadGateway(String),
}

impl From<AskStrategyError> for StrategyApiError {
    fn from(err: AskStrategyError) -> Self {
        match err {
            AskStrategyError::EmptyMessage => {
                StrategyApiError::BadRequest("Message is required".to_string())
            }
            AskStrategyError::Gateway(gateway_err) => match gateway_err {
                GatewayError::RateLimited { .. } => {
                    StrategyApiError::RateLimited(gateway_err.to_string())
                }
                GatewayError::Timeout { .. } => {
                    StrategyApiError::GatewayTimeout(gateway_err.to_string())
                }
                other => StrategyApiError::BadGateway(other.to_string()),
            },
        }
    }
}

impl IntoResponse for StrategyApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            StrategyApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            StrategyApiError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, ErrorResponse::new(msg))
            }
            StrategyApiError::GatewayTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, ErrorResponse::new(msg))
            }
            StrategyApiError::BadGateway(msg) => {
                error!("Gateway error: {}", msg);
                (StatusCode::BAD_GATEWAY, ErrorResponse::new(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
