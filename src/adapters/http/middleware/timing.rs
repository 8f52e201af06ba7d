//! Request timing middleware.
//!
//! Logs elapsed milliseconds for every request and echoes them back in an
//! `x-response-time-ms` header.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

pub const RESPONSE_TIME_HEADER: &str = "x-response-time-ms";

pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&elapsed_ms.to_string()) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }
    response
}
