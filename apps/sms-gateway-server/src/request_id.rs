use std::time::Duration;

use axum::http::{HeaderName, Request};
use axum::{body::Body, middleware::Next, response::Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::{DefaultOnRequest, TraceLayer};
use tracing::field::Empty;
use tracing::Span;

/// Request id as seen by handlers.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Generates a uuid v4 id when the caller sent none.
#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Store the request id in extensions and on the current span
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> Response {
    let rid = request_id_of(&req).to_owned();

    req.extensions_mut().insert(XRequestId(rid.clone()));
    Span::current().record("request_id", tracing::field::display(&rid));

    next.run(req).await
}

/// Short name of the SMS operation a path addresses, used to group request spans.
pub fn operation_for(path: &str) -> &'static str {
    match path.trim_end_matches('/') {
        "/v1/sms/send" => "send",
        "/v1/sms/block" => "block",
        "/v1/sms/unblock" => "unblock",
        "/health" => "health",
        _ => "unknown",
    }
}

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    DefaultOnRequest,
    fn(&Response, Duration, &Span),
>;

pub fn create_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as fn(&Request<Body>) -> Span)
        .on_response(record_response as fn(&Response, Duration, &Span))
}

fn make_span(req: &Request<Body>) -> Span {
    let path = req.uri().path();
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %path,
        operation = %operation_for(path),
        request_id = %request_id_of(req),
        status = Empty,
        latency_ms = Empty
    )
}

fn record_response(res: &Response, latency: Duration, span: &Span) {
    let status = res.status().as_u16();
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status", status);
    span.record("latency_ms", latency_ms);

    if res.status().is_server_error() {
        tracing::warn!(status, latency_ms, "request failed");
    } else {
        tracing::info!(status, latency_ms, "request finished");
    }
}

fn request_id_of<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(header())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("n/a")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_map_to_operations() {
        assert_eq!(operation_for("/v1/sms/send"), "send");
        assert_eq!(operation_for("/v1/sms/block/"), "block");
        assert_eq!(operation_for("/v1/sms/unblock"), "unblock");
        assert_eq!(operation_for("/health"), "health");
        assert_eq!(operation_for("/v1/sms/sendx"), "unknown");
    }
}
