//! Scriptable in-memory profile gateway for tests.
//!
//! Endpoints without a script answer `200 {"success":true}`, so tests only
//! spell out the endpoints they care about.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::BearerToken;
use crate::domain::profile::{EndpointRequest, ProfileEndpoint, ReportingPeriod};
use crate::ports::{GatewayError, ProfileGateway, RawResponse};

#[derive(Debug, Clone)]
enum Script {
    Respond { status: u16, body: Vec<u8> },
    Fail(GatewayError),
}

/// A request as the gateway saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: EndpointRequest,
    pub token: String,
}

/// Mock implementation of [`ProfileGateway`].
#[derive(Debug, Default)]
pub struct MockProfileGateway {
    scripts: Mutex<HashMap<ProfileEndpoint, Script>>,
    period_scripts: Mutex<HashMap<(ProfileEndpoint, ReportingPeriod), Script>>,
    delay: Mutex<Option<Duration>>,
    period_delays: Mutex<HashMap<ReportingPeriod, Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProfileGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `endpoint` to answer `status` with a JSON body.
    pub fn with_response(self, endpoint: ProfileEndpoint, status: u16, body: Value) -> Self {
        self.set_response(endpoint, status, body);
        self
    }

    /// Scripts `endpoint` to answer with raw, possibly non-JSON bytes.
    pub fn with_raw_response(
        self,
        endpoint: ProfileEndpoint,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.scripts.lock().unwrap().insert(
            endpoint,
            Script::Respond {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Scripts `endpoint` for requests carrying `period` only.
    ///
    /// Only the endpoints whose query includes the period can match.
    pub fn with_period_response(
        self,
        endpoint: ProfileEndpoint,
        period: ReportingPeriod,
        status: u16,
        body: Value,
    ) -> Self {
        self.period_scripts.lock().unwrap().insert(
            (endpoint, period),
            Script::Respond {
                status,
                body: body.to_string().into_bytes(),
            },
        );
        self
    }

    /// Makes `endpoint` fail before any response arrives.
    pub fn with_error(self, endpoint: ProfileEndpoint, error: GatewayError) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(endpoint, Script::Fail(error));
        self
    }

    /// Delays every request.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    /// Delays requests whose query carries `period`.
    pub fn with_period_delay(self, period: ReportingPeriod, delay: Duration) -> Self {
        self.period_delays.lock().unwrap().insert(period, delay);
        self
    }

    /// Re-scripts an endpoint at runtime.
    pub fn set_response(&self, endpoint: ProfileEndpoint, status: u16, body: Value) {
        self.scripts.lock().unwrap().insert(
            endpoint,
            Script::Respond {
                status,
                body: body.to_string().into_bytes(),
            },
        );
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn period_of(request: &EndpointRequest) -> Option<ReportingPeriod> {
        request
            .query
            .iter()
            .find(|(key, _)| *key == "period")
            .and_then(|(_, value)| value.parse().ok())
    }

    fn script_for(&self, request: &EndpointRequest) -> Option<Script> {
        if let Some(period) = Self::period_of(request) {
            let scripted = self
                .period_scripts
                .lock()
                .unwrap()
                .get(&(request.endpoint, period))
                .cloned();
            if scripted.is_some() {
                return scripted;
            }
        }
        self.scripts.lock().unwrap().get(&request.endpoint).cloned()
    }

    fn delay_for(&self, request: &EndpointRequest) -> Option<Duration> {
        let period_delay = Self::period_of(request)
            .and_then(|period| self.period_delays.lock().unwrap().get(&period).copied());
        period_delay.or(*self.delay.lock().unwrap())
    }
}

#[async_trait]
impl ProfileGateway for MockProfileGateway {
    async fn fetch(
        &self,
        request: &EndpointRequest,
        token: &BearerToken,
    ) -> Result<RawResponse, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            token: token.expose().to_string(),
        });

        if let Some(delay) = self.delay_for(request) {
            tokio::time::sleep(delay).await;
        }

        match self.script_for(request) {
            Some(Script::Respond { status, body }) => {
                Ok(RawResponse::new(request.endpoint, status, body))
            }
            Some(Script::Fail(error)) => Err(error),
            None => Ok(RawResponse::new(
                request.endpoint,
                200,
                r#"{"success":true}"#,
            )),
        }
    }
}
