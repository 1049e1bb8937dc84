//! HTTP server routes for version `v1`.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use hyper::Request;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::handlers::announce;
use crate::core::Canary;
use crate::servers::http::HTTP_TRACKER_LOG_TARGET;

/// It adds the routes to the router.
///
/// Requests that take longer than `request_timeout` are answered with a
/// `408 Request Timeout`.
#[allow(clippy::needless_pass_by_value)]
pub fn router(canary: Arc<Canary>, &addr: &SocketAddr, request_timeout: Duration) -> Router {
    Router::new()
        // Announce request
        .route("/announce", get(announce::handle).with_state(canary))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateHeaderLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(move |request: &Request<axum::body::Body>, _span: &Span| {
                    let method = request.method().to_string();
                    let uri = request.uri().to_string();
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();

                    tracing::span!(
                        target: HTTP_TRACKER_LOG_TARGET,
                        tracing::Level::INFO, "request", server_socket_addr= %addr, method = %method, uri = %uri, request_id = %request_id);
                })
                .on_response(move |response: &Response, latency: Duration, _span: &Span| {
                    let status_code = response.status();
                    let request_id = response
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let latency_ms = latency.as_millis();

                    tracing::span!(
                        target: HTTP_TRACKER_LOG_TARGET,
                        tracing::Level::INFO, "response", server_socket_addr= %addr, latency = %latency_ms, status = %status_code, request_id = %request_id);
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
