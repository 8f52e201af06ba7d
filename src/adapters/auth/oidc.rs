//! OIDC bearer token validation against the identity provider's JWKS.
//!
//! Keys are discovered through the issuer's `openid-configuration` document,
//! fetched lazily on the first request, and cached for a configurable TTL.
//! A token whose `kid` is unknown forces one refetch so key rotation does
//! not lock users out until the cache expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Header, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub issuer_url: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_ttl: DEFAULT_JWKS_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    fn issuer(&self) -> &str {
        self.issuer_url.trim_end_matches('/')
    }

    fn discovery_url(&self) -> String {
        format!("{}/.well-known/openid-configuration", self.issuer())
    }

    fn fallback_jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer())
    }
}

#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    jwks_uri: String,
}

/// `aud` may be a string or a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    Missing,
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::Missing => false,
            Audience::One(aud) => aud == expected,
            Audience::Many(auds) => auds.iter().any(|aud| aud == expected),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdClaims {
    sub: String,
    #[serde(default)]
    aud: Audience,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
}

impl IdClaims {
    fn into_user(self, audience: &str) -> Result<AuthenticatedUser, AuthError> {
        if !self.aud.contains(audience) {
            tracing::warn!(aud = ?self.aud, "Token audience does not match");
            return Err(AuthError::InvalidToken);
        }

        let id = UserId::new(self.sub).map_err(|_| AuthError::InvalidToken)?;
        let display_name = self.name.or(self.preferred_username);

        Ok(AuthenticatedUser::new(
            id,
            self.email.unwrap_or_default(),
            display_name,
            self.email_verified.unwrap_or(false),
        ))
    }
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Production [`SessionValidator`] for any standards-compliant OIDC issuer.
pub struct OidcSessionValidator {
    config: OidcConfig,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl OidcSessionValidator {
    /// Builds the validator. Keys are not fetched until the first request.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            cache: RwLock::new(None),
        })
    }

    async fn jwks_url(&self) -> String {
        let discovered = async {
            let response = self.client.get(self.config.discovery_url()).send().await.ok()?;
            if !response.status().is_success() {
                return None;
            }
            response.json::<DiscoveryDocument>().await.ok()
        }
        .await;

        match discovered {
            Some(doc) => doc.jwks_uri,
            None => {
                tracing::debug!("OIDC discovery unavailable, using default JWKS path");
                self.config.fallback_jwks_url()
            }
        }
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let url = self.jwks_url().await;
        tracing::debug!(url = %url, "Fetching JWKS");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "JWKS request failed");
            AuthError::service_unavailable(format!("JWKS request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "JWKS endpoint rejected request");
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "JWKS body unreadable");
            AuthError::service_unavailable(format!("Invalid JWKS: {}", e))
        })
    }

    async fn keys(&self, force_refresh: bool) -> Result<JwkSet, AuthError> {
        if !force_refresh {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.config.jwks_cache_ttl {
                    return Ok(cached.keys.clone());
                }
            }
        }

        let keys = self.fetch_keys().await?;
        *self.cache.write().await = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    async fn decoding_key(&self, header: &Header) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_deref().ok_or(AuthError::InvalidToken)?;

        let mut keys = self.keys(false).await?;
        if keys.find(kid).is_none() {
            tracing::debug!(kid, "Unknown signing key, refreshing JWKS");
            keys = self.keys(true).await?;
        }
        let jwk = keys.find(kid).ok_or(AuthError::InvalidToken)?;

        let algorithm = match jwk.common.key_algorithm {
            None | Some(KeyAlgorithm::RS256) => Algorithm::RS256,
            Some(KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!(algorithm = ?other, "Unsupported signing algorithm");
                return Err(AuthError::InvalidToken);
            }
        };

        let key = DecodingKey::from_jwk(jwk).map_err(|_| AuthError::InvalidToken)?;
        Ok((key, algorithm))
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[self.config.issuer_url.as_str(), self.config.issuer()]);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let (key, algorithm) = self.decoding_key(&header).await?;

        let claims = decode::<IdClaims>(token, &key, &self.validation(algorithm))
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                kind => {
                    tracing::debug!(error = ?kind, "Token rejected");
                    AuthError::InvalidToken
                }
            })?
            .claims;

        claims.into_user(&self.config.audience)
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: serde_json::Value) -> IdClaims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn discovery_urls_ignore_trailing_slash() {
        let config = OidcConfig::new("https://id.example.com/", "wellness-api");
        assert_eq!(
            config.discovery_url(),
            "https://id.example.com/.well-known/openid-configuration"
        );
        assert_eq!(
            config.fallback_jwks_url(),
            "https://id.example.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn default_cache_ttl_is_one_hour() {
        let config = OidcConfig::new("https://id.example.com", "api");
        assert_eq!(config.jwks_cache_ttl, Duration::from_secs(3600));
        let config = config.with_cache_ttl(Duration::from_secs(60));
        assert_eq!(config.jwks_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn audience_accepts_string_or_list() {
        let single = claims(json!({"sub": "u1", "aud": "api"}));
        assert!(single.aud.contains("api"));

        let many = claims(json!({"sub": "u1", "aud": ["other", "api"]}));
        assert!(many.aud.contains("api"));
        assert!(!many.aud.contains("missing"));

        let none = claims(json!({"sub": "u1"}));
        assert!(!none.aud.contains("api"));
    }

    #[test]
    fn claims_map_to_user_with_name_fallback() {
        let user = claims(json!({
            "sub": "user-9",
            "aud": "api",
            "email": "nine@example.com",
            "email_verified": true,
            "preferred_username": "nine"
        }))
        .into_user("api")
        .unwrap();

        assert_eq!(user.id.as_str(), "user-9");
        assert_eq!(user.display_name_or_email(), "nine");
        assert!(user.email_verified);
    }

    #[test]
    fn claims_with_wrong_audience_are_rejected() {
        let result = claims(json!({"sub": "u1", "aud": "someone-else"})).into_user("api");
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn blank_subject_is_rejected() {
        let result = claims(json!({"sub": " ", "aud": "api"})).into_user("api");
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn garbage_token_fails_before_any_network_call() {
        let validator =
            OidcSessionValidator::new(OidcConfig::new("https://id.invalid", "api")).unwrap();

        let err = validator.validate("not-a-jwt").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }
}
