//! Environment-driven configuration.
//!
//! Settings come from process environment variables (and a `.env` file in
//! development, via `dotenvy`). Variables carry the `MEDIATION_DESK` prefix
//! and use `__` to address nested fields, e.g.
//! `MEDIATION_DESK__SERVER__PORT=8080` or
//! `MEDIATION_DESK__AI__OPENAI_API_KEY=sk-...`.
//!
//! ```no_run
//! use mediation_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let addr = config.server.socket_addr().expect("Invalid bind address");
//! println!("Server running on {}", addr);
//! ```

mod ai;
mod error;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root of the configuration tree.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// AI gateway settings.
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// A `.env` file is loaded first when present, then prefixed variables
    /// are deserialized into the typed tree.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable cannot be parsed into its
    /// target type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDIATION_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section for consistency.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Returns true when deployed to production.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
