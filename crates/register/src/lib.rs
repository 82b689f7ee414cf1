//! EaseBarkod Register - point-of-sale web app.
//!
//! Serves two independent screens:
//! - the cart screen, where barcodes are scanned or products entered by
//!   hand, quantities edited, and the cart checked out
//! - the login screen, which forwards credentials to an upstream endpoint
//!   and stores the returned token in a cookie
//!
//! # Architecture
//!
//! - Axum web framework, plain HTML forms (no client-side scripting)
//! - Askama templates for server-side rendering
//! - tower-sessions for visitor identity, with per-visitor state in a
//!   `moka` cache behind an async mutex
//! - reqwest client for the upstream login endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory holding the stylesheet.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the full application router with its middleware stack.
///
/// Sentry layers are not included; `main` adds them outermost.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
