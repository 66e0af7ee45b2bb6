mod app;
mod config;
mod handlers;
mod models;
mod service;
mod state;

use std::process::ExitCode;

use fs_common::{bind_listener, init_tracing, shutdown_signal};

use crate::config::{ServiceConfig, LISTEN_PORT};
use crate::models::TelemetrySnapshot;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let _guards = init_tracing("telemetry-service");

    let config = ServiceConfig::from_env();
    // Seed values stand in for the perception feed.
    let state = AppState::new(&config, TelemetrySnapshot::seed());

    let listener = match bind_listener(LISTEN_PORT).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, port = LISTEN_PORT, "bind listener failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(port = LISTEN_PORT, host = %config.host, "telemetry service listening");

    let app = app::build_router(state);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
