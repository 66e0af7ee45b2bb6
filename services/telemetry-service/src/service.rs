use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::models::{ErrorResponse, TelemetrySnapshot};
use crate::state::AppState;

#[derive(Debug)]
pub struct ServiceError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ServiceError {
    pub fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            body: ErrorResponse { code, message },
        }
    }

    pub fn data_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "data_unavailable",
            "telemetry feed not initialised".to_string(),
        )
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn banner(state: &AppState) -> String {
    format!("FS Telemetry running on {}", state.host)
}

pub fn current_snapshot(state: &AppState) -> Result<Arc<TelemetrySnapshot>, ServiceError> {
    state.snapshot.clone().ok_or_else(|| {
        tracing::warn!("telemetry requested before a snapshot was available");
        ServiceError::data_unavailable()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn config(host: &str) -> ServiceConfig {
        ServiceConfig {
            host: host.to_string(),
        }
    }

    #[test]
    fn banner_includes_host() {
        let state = AppState::new(&config("rig-01"), TelemetrySnapshot::seed());
        assert_eq!(banner(&state), "FS Telemetry running on rig-01");
    }

    #[test]
    fn missing_snapshot_is_data_unavailable() {
        let state = AppState::without_snapshot(&config("unknown"));
        let err = current_snapshot(&state).unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.body.code, "data_unavailable");
    }

    #[test]
    fn snapshot_is_shared_not_copied() {
        let state = AppState::new(&config("unknown"), TelemetrySnapshot::seed());
        let first = current_snapshot(&state).unwrap();
        let second = current_snapshot(&state).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
