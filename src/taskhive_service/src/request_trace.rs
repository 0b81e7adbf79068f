use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::request_id::RequestId;
use tracing::Span;

/// Root span for each request, tagged with the request id that
/// `SetRequestIdLayer` put on the request.
pub fn make_span_with_request_id<B>(request: &Request<B>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

pub fn on_request<B>(_request: &Request<B>, _span: &Span) {
    tracing::info!("started processing request");
}

pub fn on_response<B>(response: &Response<B>, latency: Duration, _span: &Span) {
    tracing::info!(
        status = %response.status(),
        latency_ms = %latency.as_millis(),
        "finished processing request"
    );
}
