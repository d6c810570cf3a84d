//! Mock Strategy Gateway for testing.
//!
//! Configurable mock implementation of the StrategyGateway port, so
//! conversation flows can be exercised without a live suggestion service.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockGateway::new()
//!     .with_reply("STRATEGY OVERVIEW: Listen first.")
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GatewayError, StrategyGateway, StrategyReply, StrategyRequest};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return a successful reply with this raw text.
    Reply(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error shapes for failure testing.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for GatewayError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                GatewayError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => GatewayError::unavailable(message),
            MockError::AuthenticationFailed => GatewayError::AuthenticationFailed,
            MockError::Network { message } => GatewayError::network(message),
            MockError::Timeout { timeout_secs } => GatewayError::Timeout { timeout_secs },
        }
    }
}

/// Mock strategy gateway.
///
/// Outcomes are consumed in order; once the queue is empty a fixed default
/// reply is returned. Received requests are recorded for verification.
#[derive(Debug, Clone)]
pub struct MockGateway {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    requests: Arc<Mutex<Vec<StrategyRequest>>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Creates a new mock gateway with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_reply(self, raw: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(raw.into()));
        self
    }

    /// Queues an error outcome.
    pub fn with_error(self, error: MockError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the requests received so far.
    pub fn received_requests(&self) -> Vec<StrategyRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many requests have been received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl StrategyGateway for MockGateway {
    async fn request_strategy(
        &self,
        request: StrategyRequest,
    ) -> Result<StrategyReply, GatewayError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.requests.lock().unwrap().push(request);

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Reply(raw)) => Ok(StrategyReply::new(raw)),
            Some(MockOutcome::Error(err)) => Err(err.into()),
            None => Ok(StrategyReply::new("Mock strategy suggestion")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let gateway = MockGateway::new().with_reply("first").with_reply("second");

        let a = gateway
            .request_strategy(StrategyRequest::new("one"))
            .await
            .unwrap();
        let b = gateway
            .request_strategy(StrategyRequest::new("two"))
            .await
            .unwrap();

        assert_eq!(a.response, "first");
        assert_eq!(b.response, "second");
    }

    #[tokio::test]
    async fn errors_are_injected() {
        let gateway = MockGateway::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });

        let result = gateway.request_strategy(StrategyRequest::new("hi")).await;
        assert!(matches!(result, Err(GatewayError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn exhausted_queue_returns_default_reply() {
        let gateway = MockGateway::new();
        let reply = gateway
            .request_strategy(StrategyRequest::new("hi"))
            .await
            .unwrap();
        assert_eq!(reply.response, "Mock strategy suggestion");
    }

    #[tokio::test]
    async fn records_received_requests() {
        let gateway = MockGateway::new().with_reply("ok");
        gateway
            .request_strategy(StrategyRequest::new("question text"))
            .await
            .unwrap();

        assert_eq!(gateway.request_count(), 1);
        assert_eq!(gateway.received_requests()[0].message, "question text");
    }
}
