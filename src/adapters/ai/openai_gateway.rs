//! OpenAI Gateway - StrategyGateway implementation against OpenAI's API.
//!
//! Builds the system and case-context prompts, calls the chat completions
//! endpoint, and maps the response (or its failure modes) onto the port
//! types. One suggestion request maps to one completion call; the retry
//! policy lives in the conversation flow, not here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let gateway = OpenAiGateway::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::case::CaseDetails;
use crate::ports::{GatewayError, StrategyGateway, StrategyReply, StrategyRequest};

/// System prompt framing the assistant's role.
const SYSTEM_PROMPT: &str = "You are an AI Strategy Assistant for conflict mediators and counselors.
Your purpose is to help analyze conflicts and suggest effective resolution strategies.
You have expertise in the Cynefin Framework (Clear, Complicated, Complex, Chaotic domains) and conflict mediation techniques.

When responding, consider:
1. The domain of the conflict in the Cynefin Framework
2. The timeline of events and stakeholder perspectives
3. Appropriate mediation techniques based on the conflict domain
4. Practical next steps the counselor could take

Be concise, practical, and specific in your suggestions. Focus on actionable advice rather than general principles.";

/// Reply substituted when the completion comes back without content.
const MISSING_COMPLETION_REPLY: &str = "I'm sorry, I couldn't generate a response.";

/// Configuration for the OpenAI gateway.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-backed strategy gateway.
pub struct OpenAiGateway {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiGateway {
    /// Creates a new gateway with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Renders the case context block prepended to the user message.
    fn context_prompt(case: &CaseDetails) -> String {
        let timeline = case
            .timeline
            .iter()
            .map(|event| event.to_context_line())
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "\nCase Information:\n\
             - Title: {}\n\
             - Current Status: {}\n\
             - Stakeholders: {}\n\
             - Current Cynefin Domain: {}\n\
             - Domain Rationale: {}\n\
             \n\
             Timeline:\n\
             {}\n",
            case.title,
            case.status,
            case.stakeholders.join(", "),
            case.cynefin_domain,
            case.cynefin_rationale,
            timeline,
        )
    }

    /// Converts a port request to OpenAI's wire format.
    fn to_wire_request(&self, request: &StrategyRequest) -> ChatCompletionRequest {
        let context = request
            .case_details
            .as_ref()
            .map(Self::context_prompt)
            .unwrap_or_default();

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: format!("{}\n\nCounselor's question: {}", context, request.message),
                },
            ],
            temperature: 0.7,
        }
    }

    /// Maps a non-success HTTP status onto a gateway error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(GatewayError::AuthenticationFailed),
            429 => Err(GatewayError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 => Err(GatewayError::InvalidRequest(error_body)),
            500..=599 => Err(GatewayError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GatewayError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Pulls a retry-after hint out of a rate limit error body.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed.get("error").and_then(|e| e.get("message")) {
                if let Some(s) = msg.as_str() {
                    // OpenAI sometimes embeds "try again in Xs" in the message
                    if let Some(idx) = s.find("try again in ") {
                        let rest = &s[idx + 13..];
                        if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                            if let Ok(secs) = rest[..num_end].parse::<u32>() {
                                return secs;
                            }
                        }
                    }
                }
            }
        }
        30
    }

    async fn parse_response(&self, response: Response) -> Result<StrategyReply, GatewayError> {
        let response = self.handle_response_status(response).await?;

        let wire: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::parse(format!("Failed to parse response: {}", e)))?;

        let content = wire
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| MISSING_COMPLETION_REPLY.to_string());

        Ok(StrategyReply::new(content))
    }
}

#[async_trait]
impl StrategyGateway for OpenAiGateway {
    async fn request_strategy(
        &self,
        request: StrategyRequest,
    ) -> Result<StrategyReply, GatewayError> {
        debug!(
            case_id = request
                .case_details
                .as_ref()
                .map(|c| c.id.as_str())
                .unwrap_or("none"),
            "requesting strategy suggestion"
        );

        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GatewayError::network(format!("Connection failed: {}", e))
                } else {
                    GatewayError::network(e.to_string())
                }
            })?;

        self.parse_response(response).await
    }
}

// ----- OpenAI wire types -----

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}
