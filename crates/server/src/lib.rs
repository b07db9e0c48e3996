pub mod gateway;
pub mod handler;
pub mod middleware;
pub mod relay;
pub mod response;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::{Router, middleware as axum_mw};
use relay::ChatRelay;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    pub body_limit_bytes: usize,
}

pub fn build_router(state: AppState) -> Router {
    // Relay routes: any method, CORS headers written by the relay itself.
    // Oversized bodies surface as a rejection in the handler, not a bare 413.
    let relay_routes = Router::new()
        .route("/", any(handler::chat::chat))
        .route("/chat", any(handler::chat::chat))
        .layer(DefaultBodyLimit::max(state.body_limit_bytes));

    Router::new()
        .route("/health", get(handler::health::health))
        .merge(relay_routes)
        .layer(axum_mw::from_fn(
            middleware::request_logging::request_logging_middleware,
        ))
        .layer(axum_mw::from_fn(
            middleware::request_context::request_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
