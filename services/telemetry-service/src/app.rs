use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{index, status, telemetry};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/telemetry", get(telemetry))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
