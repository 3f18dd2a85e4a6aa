use std::time::Duration;

use axum::{
    extract::Request,
    http::{
        header::{CONTENT_TYPE, USER_AGENT},
        HeaderName,
    },
    response::Response,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn, Span};

use super::request_id::RequestId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(|_: &Request, _: &Span| debug!("accepted request"))
            .on_response(log_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn request_span(request: &Request) -> Span {
    let header = |name: HeaderName| {
        request
            .headers()
            .get(name)
            .and_then(|x| x.to_str().ok())
            .unwrap_or("-")
            .to_owned()
    };
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    tracing::debug_span!(
        "http-request",
        version = ?request.version(),
        method = %request.method(),
        path = request.uri().path(),
        content_type = %header(CONTENT_TYPE),
        user_agent = %header(USER_AGENT),
        %request_id
    )
}

fn log_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    if status.is_server_error() {
        warn!(?latency, %status, "request failed");
    } else {
        debug!(?latency, %status, "request done");
    }
}
