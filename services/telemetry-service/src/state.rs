use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::models::TelemetrySnapshot;

/// Read-only after construction, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<str>,
    pub snapshot: Option<Arc<TelemetrySnapshot>>,
}

impl AppState {
    pub fn new(config: &ServiceConfig, snapshot: TelemetrySnapshot) -> Self {
        Self {
            host: Arc::from(config.host.as_str()),
            snapshot: Some(Arc::new(snapshot)),
        }
    }

    /// State for a service whose data feed has not produced a snapshot yet.
    #[allow(dead_code)]
    pub fn without_snapshot(config: &ServiceConfig) -> Self {
        Self {
            host: Arc::from(config.host.as_str()),
            snapshot: None,
        }
    }
}
