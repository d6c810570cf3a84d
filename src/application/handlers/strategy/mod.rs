//! Strategy assistant handlers.

mod ask_strategy;
mod assistant;

pub use ask_strategy::{
    AskStrategyCommand, AskStrategyError, AskStrategyHandler, AskStrategyResult,
};
pub use assistant::StrategyAssistant;
