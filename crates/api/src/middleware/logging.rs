//! Request logging middleware.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log every request with method, path, status and latency
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis();

    if response.status().is_server_error() {
        tracing::error!(%method, path, status, latency_ms, "request");
    } else {
        tracing::info!(%method, path, status, latency_ms, "request");
    }

    response
}
