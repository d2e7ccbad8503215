use crate::web::handlers::{health, slack_events};
use crate::web::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/slack/events", post(slack_events))
}

/// Router with the access log and, when set, a per-request timeout.
/// Access lines are emitted at INFO so they survive the default filter.
pub fn build_router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let access_log = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let router = create_router().with_state(state).layer(access_log);

    match request_timeout {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    }
}
