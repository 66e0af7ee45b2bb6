use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::{StatusResponse, TelemetrySnapshot};
use crate::service::{self, ServiceError};
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> String {
    service::banner(&state)
}

pub async fn telemetry(
    State(state): State<AppState>,
) -> Result<Json<Arc<TelemetrySnapshot>>, ServiceError> {
    service::current_snapshot(&state).map(Json)
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[tokio::test]
    async fn telemetry_serves_the_shared_snapshot() {
        let config = ServiceConfig {
            host: "unknown".to_string(),
        };
        let state = AppState::new(&config, TelemetrySnapshot::seed());
        let shared = state.snapshot.clone().unwrap();

        let Json(served) = telemetry(State(state)).await.unwrap();
        assert!(Arc::ptr_eq(&served, &shared));
    }
}
