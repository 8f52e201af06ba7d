//! Profile gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::gateway::HttpGatewayConfig;

/// Where the seven profile endpoints live
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL the endpoint paths are appended to, e.g. `https://api.example.com/api`
    pub base_url: String,

    /// Per-request timeout; unset means requests may wait indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn http(&self) -> HttpGatewayConfig {
        let config = HttpGatewayConfig::new(&self.base_url);
        match self.request_timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__BASE_URL"));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidGatewayUrl(e.to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if environment != Environment::Production => {}
            "http" => return Err(ValidationError::GatewayMustBeHttps),
            other => {
                return Err(ValidationError::InvalidGatewayUrl(format!(
                    "unsupported scheme {}",
                    other
                )))
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
