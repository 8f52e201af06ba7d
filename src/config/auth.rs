//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::OidcConfig;

/// OIDC issuer settings for bearer token validation
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Issuer URL; JWKS are discovered beneath it
    pub issuer_url: String,

    /// Expected `aud` claim
    pub audience: String,

    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    pub fn oidc(&self) -> OidcConfig {
        OidcConfig::new(&self.issuer_url, &self.audience).with_cache_ttl(self.jwks_cache_ttl())
    }

    /// In production the issuer must be served over HTTPS.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.issuer_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER_URL"));
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        if environment == Environment::Production && !self.issuer_url.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }
        Ok(())
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}
