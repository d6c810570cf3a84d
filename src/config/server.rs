//! HTTP listener settings.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Longest request timeout the server accepts, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Settings for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, as an IP address.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Deployment environment.
    pub environment: Environment,
    /// Tracing filter directive (RUST_LOG syntax).
    pub log_filter: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Comma-separated CORS origin allowlist; empty means wildcard.
    pub cors_origins: String,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_filter: "info,mediation_desk=debug".to_string(),
            request_timeout_secs: 30,
            cors_origins: String::new(),
        }
    }
}

impl ServerConfig {
    /// Resolves the address to bind.
    ///
    /// # Errors
    ///
    /// - `InvalidHost` if the host is not a literal IP address
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidHost)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns true in production.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Returns the configured CORS origins, empty for wildcard.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validates the listener settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
