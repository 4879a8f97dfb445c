//! # Gompa Server
//!
//! axum front end for the heritage catalog. The binary in `main.rs` loads
//! configuration, picks the Postgres or in-memory adapters and serves the
//! router built by [`create_app`].

pub mod api;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::infra::config::CorsConfig;

pub fn create_app(state: AppState) -> Router {
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        cors_layer(&state.config().cors)
    };

    Router::new()
        .route(api::routes::PING, get(handlers::health::ping_handler))
        .route(api::routes::HEALTH, get(handlers::health::health_handler))
        .merge(routes::create_api_router())
        // Outer to inner: CORS, then tracing
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Allow-list CORS layer. Entries were validated at config load; any that
/// still fail to parse are skipped.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|s| axum::http::HeaderValue::from_str(s).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();

    let headers: Vec<axum::http::HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| axum::http::HeaderName::from_bytes(h.as_bytes()).ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    if cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}
