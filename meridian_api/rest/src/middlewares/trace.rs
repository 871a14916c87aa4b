use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    response::Response,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn, Span};

use super::request_id::RequestId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(|_: &Request, _: &Span| debug!("request received"))
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    let version = request.version();
    let method = request.method();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    tracing::info_span!("http-request", ?version, %method, %route, %request_id)
}

fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    if status.is_server_error() {
        warn!(?latency, %status, "request failed");
    } else {
        debug!(?latency, %status, "response sent");
    }
}
