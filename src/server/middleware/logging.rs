use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line per request: `HTTP <method> <path?query> -> <status> (<ms> ms)`.
///
/// Server errors are logged at warn level, everything else at info.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();
    if response.status().is_server_error() {
        tracing::warn!("HTTP {} {} -> {} ({} ms)", method, target, status, elapsed_ms);
    } else {
        tracing::info!("HTTP {} {} -> {} ({} ms)", method, target, status, elapsed_ms);
    }

    response
}
