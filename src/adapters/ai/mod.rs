//! Strategy gateway adapters.

mod mock_gateway;
mod openai_gateway;

pub use mock_gateway::{MockError, MockGateway, MockOutcome};
pub use openai_gateway::{OpenAiConfig, OpenAiGateway};
