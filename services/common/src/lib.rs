//! Runtime plumbing shared by the FS telemetry services: tracing setup,
//! typed environment lookups, listener binding and shutdown handling.

use std::{
    env, fs, io,
    net::SocketAddr,
    panic,
    path::{Path, PathBuf},
    str::FromStr,
    thread,
    time::{Duration, SystemTime},
};
use tokio::net::TcpListener;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

const DEFAULT_LOG_DIR: &str = "/var/log/fs-telemetry";
const DEFAULT_RETENTION_DAYS: u64 = 14;
const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 360;

/// Keeps the non-blocking file writer alive. Drop it last in `main`.
pub struct TracingGuards {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_tracing(service_name: &str) -> TracingGuards {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_root = log_root(env::var("LOG_DIR").ok(), service_name);
    let stdout_layer = fmt::layer().with_writer(io::stdout);

    // A read-only filesystem leaves us with stdout only.
    let file_sink = fs::create_dir_all(&log_root)
        .ok()
        .and_then(|_| {
            panic::catch_unwind(|| {
                tracing_appender::rolling::daily(&log_root, format!("{service_name}.log"))
            })
            .ok()
        })
        .map(tracing_appender::non_blocking);

    let file_guard = match file_sink {
        Some((writer, guard)) => {
            let subscriber = Registry::default()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer));
            let _ = tracing::subscriber::set_global_default(subscriber);
            Some(guard)
        }
        None => {
            let subscriber = Registry::default().with(filter).with(stdout_layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
            None
        }
    };

    if file_guard.is_some() {
        let retention_days = env_or("LOG_RETENTION_DAYS", DEFAULT_RETENTION_DAYS);
        let cleanup_interval =
            env_or("LOG_CLEANUP_INTERVAL_MINUTES", DEFAULT_CLEANUP_INTERVAL_MINUTES);
        tracing::debug!(path = %log_root.display(), retention_days, "file logging enabled");
        spawn_log_cleanup(log_root, retention_days, cleanup_interval);
    } else {
        tracing::warn!(path = %log_root.display(), "file logging unavailable, using stdout only");
    }

    TracingGuards {
        _file_guard: file_guard,
    }
}

fn log_root(log_dir: Option<String>, service_name: &str) -> PathBuf {
    PathBuf::from(log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())).join(service_name)
}

/// Parses `key` from the environment, falling back to `default` when the
/// variable is unset or does not parse.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Retention and sweep interval for log pruning. `None` when either knob is
/// zero; values too large to express in seconds fall back to the defaults.
fn cleanup_schedule(
    retention_days: u64,
    cleanup_interval_minutes: u64,
) -> Option<(Duration, Duration)> {
    if retention_days == 0 || cleanup_interval_minutes == 0 {
        return None;
    }

    let retention = retention_days
        .checked_mul(24 * 60 * 60)
        .unwrap_or(DEFAULT_RETENTION_DAYS * 24 * 60 * 60);
    let interval = cleanup_interval_minutes
        .checked_mul(60)
        .unwrap_or(DEFAULT_CLEANUP_INTERVAL_MINUTES * 60);
    Some((Duration::from_secs(retention), Duration::from_secs(interval)))
}

fn spawn_log_cleanup(log_root: PathBuf, retention_days: u64, cleanup_interval_minutes: u64) {
    let Some((retention, interval)) = cleanup_schedule(retention_days, cleanup_interval_minutes)
    else {
        return;
    };

    thread::spawn(move || loop {
        if let Some(cutoff) = SystemTime::now().checked_sub(retention) {
            let removed = prune_logs_older_than(&log_root, cutoff);
            if removed > 0 {
                tracing::info!(removed, "pruned old log files");
            }
        }
        thread::sleep(interval);
    });
}

/// Removes files under `root` last modified before `cutoff`. Returns the
/// number of files removed.
fn prune_logs_older_than(root: &Path, cutoff: SystemTime) -> usize {
    let Ok(entries) = fs::read_dir(root) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            removed += prune_logs_older_than(&path, cutoff);
            continue;
        }
        let modified = fs::metadata(&path).and_then(|metadata| metadata.modified());
        if matches!(modified, Ok(modified) if modified < cutoff) && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    removed
}

/// Binds on all interfaces so the service is reachable from inside a container.
pub async fn bind_listener(port: u16) -> io::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr).await
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "sigterm handler unavailable");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
    }

    tracing::info!("shutdown signal received");
}
