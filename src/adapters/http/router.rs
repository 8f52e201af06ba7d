//! Assembles every HTTP route and the cross-cutting layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::profile::ProfileAggregator;
use crate::application::handlers::speech::{ListLanguagesHandler, TranscribeAudioHandler};
use crate::ports::Transcriber;

use super::exercises::exercises_router;
use super::middleware::{auth_middleware, AuthState};
use super::profile::{profile_router, ProfileAppState};
use super::speech::{speech_router, SpeechAppState};

/// Everything the router needs, already wired to concrete adapters.
pub struct AppServices {
    pub validator: AuthState,
    pub aggregator: Arc<ProfileAggregator>,
    pub transcriber: Arc<dyn Transcriber>,
    pub max_audio_bytes: usize,
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

pub fn build_router(services: AppServices) -> Router {
    let profile_state = ProfileAppState::new(services.aggregator);
    let speech_state = SpeechAppState::new(
        Arc::new(
            TranscribeAudioHandler::new(services.transcriber.clone())
                .with_max_bytes(services.max_audio_bytes),
        ),
        Arc::new(ListLanguagesHandler::new(services.transcriber)),
    );

    let api = Router::new()
        .nest("/api/profile", profile_router().with_state(profile_state))
        .nest(
            "/api/speech",
            speech_router(services.max_audio_bytes).with_state(speech_state),
        )
        .nest("/api/exercises", exercises_router())
        .layer(middleware::from_fn_with_state(
            services.validator,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TimeoutLayer::new(services.request_timeout))
        .layer(cors_layer(&services.cors_origins))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
