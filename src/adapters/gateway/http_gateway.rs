//! reqwest-backed profile gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::domain::foundation::BearerToken;
use crate::domain::profile::EndpointRequest;
use crate::ports::{GatewayError, ProfileGateway, RawResponse};

/// Connection settings for the backend that serves the profile endpoints.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// e.g. `https://api.example.com/api`; endpoint paths are appended.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

pub struct HttpProfileGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let parsed = reqwest::Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::InvalidUrl(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &EndpointRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint.path())
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn fetch(
        &self,
        request: &EndpointRequest,
        token: &BearerToken,
    ) -> Result<RawResponse, GatewayError> {
        let endpoint = request.endpoint;
        let to_error = |e: reqwest::Error| {
            if e.is_timeout() {
                GatewayError::Timeout { endpoint }
            } else {
                GatewayError::network(endpoint, e.to_string())
            }
        };

        let response = self
            .client
            .get(self.url_for(request))
            .query(&request.query)
            .header(AUTHORIZATION, token.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(to_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(to_error)?;

        tracing::trace!(endpoint = %endpoint, status, bytes = body.len(), "Profile endpoint responded");

        Ok(RawResponse::new(endpoint, status, body.to_vec()))
    }
}

impl std::fmt::Debug for HttpProfileGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProfileGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{ProfileEndpoint, ReportingPeriod};

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpProfileGateway::new(HttpGatewayConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = HttpProfileGateway::new(HttpGatewayConfig::new("ftp://files.example.com"))
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl(_)));
    }

    #[test]
    fn endpoint_paths_are_appended_to_base_path() {
        let gateway =
            HttpProfileGateway::new(HttpGatewayConfig::new("https://api.example.com/api/")).unwrap();
        let request = EndpointRequest::new(ProfileEndpoint::JournalEntries, ReportingPeriod::Week);

        assert_eq!(
            gateway.url_for(&request),
            "https://api.example.com/api/journal/entries"
        );
    }
}
