use std::time::Instant;

use axum::{middleware::Next, response::Response};
use tracing::Instrument;

/// Wrap every request in a span and log its outcome.
pub async fn trace_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("http_request", %method, %path);

    async move {
        let started = Instant::now();
        let res = next.run(req).await;
        let status = res.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), elapsed_ms, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}
