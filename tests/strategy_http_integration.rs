//! Integration tests for the strategy assistant HTTP surface.
//!
//! Drives the real router with the mock gateway to verify:
//! 1. Request DTOs deserialize the dashboard's JSON
//! 2. Success and error bodies have the wire shapes the front end parses
//! 3. Gateway failures map to the right status codes

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use mediation_desk::adapters::ai::{MockError, MockGateway};
use mediation_desk::adapters::http::strategy::{strategy_router, StrategyAppState};
use mediation_desk::application::handlers::strategy::AskStrategyHandler;

fn app(gateway: MockGateway) -> axum::Router {
    let handler = AskStrategyHandler::new(Arc::new(gateway));
    strategy_router().with_state(StrategyAppState::new(Arc::new(handler)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let response = app(MockGateway::new())
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn ask_strategy_returns_raw_response() {
    let gateway = MockGateway::new()
        .with_reply("STRATEGY OVERVIEW: Start small.\nMEDIATION PROCESS:\n1. Listen");
    let response = app(gateway)
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({"message": "What first?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["response"],
        "STRATEGY OVERVIEW: Start small.\nMEDIATION PROCESS:\n1. Listen"
    );
}

#[tokio::test]
async fn ask_strategy_forwards_case_details() {
    let gateway = MockGateway::new().with_reply("ok");
    let app = app(gateway.clone());

    let response = app
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({
                "message": "Advice?",
                "caseDetails": {
                    "id": "12",
                    "title": "Bus seating conflict",
                    "stakeholders": ["Noor", "Theo"],
                    "status": "In Progress",
                    "dateCreated": "2026-04-11",
                    "timeline": [{
                        "id": "e1",
                        "title": "Argument on bus",
                        "description": "Shouting over seats",
                        "date": "2026-04-10",
                        "stakeholder": "Noor"
                    }],
                    "cynefinDomain": "Complex",
                    "cynefinRationale": "Shifting friend groups"
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let requests = gateway.received_requests();
    assert_eq!(requests.len(), 1);
    let case = requests[0].case_details.as_ref().unwrap();
    assert_eq!(case.id.as_str(), "12");
    assert_eq!(case.timeline.len(), 1);
}

#[tokio::test]
async fn empty_message_returns_bad_request() {
    let response = app(MockGateway::new())
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({"message": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn rate_limited_gateway_returns_429() {
    let gateway = MockGateway::new().with_error(MockError::RateLimited {
        retry_after_secs: 20,
    });
    let response = app(gateway)
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({"message": "Hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("rate limited"));
}

#[tokio::test]
async fn gateway_timeout_returns_504() {
    let gateway = MockGateway::new().with_error(MockError::Timeout { timeout_secs: 60 });
    let response = app(gateway)
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({"message": "Hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn unavailable_gateway_returns_502_with_error_body() {
    let gateway = MockGateway::new().with_error(MockError::Unavailable {
        message: "upstream down".to_string(),
    });
    let response = app(gateway)
        .oneshot(post_json(
            "/api/strategy-assistant",
            json!({"message": "Hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("upstream down"));
}
