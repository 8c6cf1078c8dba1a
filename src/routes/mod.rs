// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    http::{HeaderName, Method, header},
};
use chat::chat_handler;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request headers a browser client may send to the relay.
pub const ALLOW_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// The relay answers on every path, the way a serverless function is mounted.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        .fallback(chat_handler)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Preflight is answered by the layer without reaching the handler; every
/// other response gets the wildcard origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(ALLOW_HEADERS)
}
