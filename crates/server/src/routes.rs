use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors;
use crate::state::AppState;

pub mod items;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: item CRUD, health, and the
/// panic-recovery, timeout, CORS and tracing layers.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        .route("/health", get(health))
        .route("/item", post(items::create_item))
        .route("/item/:id", get(items::get_item).delete(items::delete_item))
        .with_state(state)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
