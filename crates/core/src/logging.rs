use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `~/.servicescope/logs`, or `./.servicescope/logs` without a home directory.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| ".".into())
        .join(".servicescope")
        .join("logs")
}

/// Installs the global subscriber. Events always go to stderr; with a
/// `log_dir` they are also appended to a daily file named after `component`
/// (`discover.log.2026-10-18`). Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init_logging(component: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    let (file_layer, guard) = match log_dir.and_then(|dir| file_writer(dir, component)) {
        Some((writer, guard)) => {
            let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn file_writer(dir: &Path, component: &str) -> Option<(NonBlocking, WorkerGuard)> {
    // unwritable log dir: stderr only
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("cannot create log directory {}: {e}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::daily(dir, component);
    Some(tracing_appender::non_blocking(appender))
}
