//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file in
//! development) using the `config` and `dotenvy` crates. Variables carry the
//! `WELLNESS` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use wellness_profile::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod error;
mod gateway;
mod server;
mod upload;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::{Environment, ServerConfig};
pub use upload::UploadConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend serving the profile endpoints
    pub gateway: GatewayConfig,

    /// OIDC issuer for bearer token validation
    pub auth: AuthConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `WELLNESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WELLNESS__GATEWAY__BASE_URL=...` -> `gateway.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLNESS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = self.server.environment;
        self.server.validate()?;
        self.gateway.validate(environment)?;
        self.auth.validate(environment)?;
        self.upload.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "WELLNESS__GATEWAY__BASE_URL",
        "WELLNESS__GATEWAY__REQUEST_TIMEOUT_SECS",
        "WELLNESS__AUTH__ISSUER_URL",
        "WELLNESS__AUTH__AUDIENCE",
        "WELLNESS__SERVER__PORT",
        "WELLNESS__SERVER__ENVIRONMENT",
        "WELLNESS__UPLOAD__MAX_AUDIO_BYTES",
    ];

    fn set_minimal_env() {
        env::set_var("WELLNESS__GATEWAY__BASE_URL", "http://localhost:3001/api");
        env::set_var("WELLNESS__AUTH__ISSUER_URL", "http://localhost:8081");
        env::set_var("WELLNESS__AUTH__AUDIENCE", "wellness-api");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.gateway.base_url, "http://localhost:3001/api");
        assert_eq!(config.gateway.request_timeout_secs, None);
        assert_eq!(config.auth.audience, "wellness-api");
        assert_eq!(config.upload.max_audio_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("WELLNESS__SERVER__PORT", "3000"),
            ("WELLNESS__GATEWAY__REQUEST_TIMEOUT_SECS", "15"),
            ("WELLNESS__UPLOAD__MAX_AUDIO_BYTES", "1048576"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.gateway.request_timeout_secs, Some(15));
        assert_eq!(config.upload.max_audio_bytes, 1024 * 1024);
    }

    #[test]
    fn test_production_rejects_plain_http() {
        let config = load_with(&[("WELLNESS__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::GatewayMustBeHttps));
    }
}
