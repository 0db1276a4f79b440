//! Hadawi Admin library.
//!
//! This crate provides the admin panel as a library, allowing the full
//! router to be tested in-process and reused by the binary.
//!
//! # Security
//!
//! The panel holds admin bearer tokens for the Hadawi API in server-side
//! sessions. Tokens never reach the browser; the session cookie is signed,
//! HTTP-only and `SameSite=Strict`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
    middleware::from_fn,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod hadawi;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod state;

use middleware::{
    create_session_layer, request_id_middleware, revoke_rejected_token,
    security_headers_middleware,
};
use state::AppState;

/// Build the complete application router with its middleware stack.
///
/// Sentry layers are added by the binary; everything else a request passes
/// through in production is here.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    // Outermost first.
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<Body>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(revoke_rejected_token));

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(middleware)
        .with_state(state)
}
