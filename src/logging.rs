//! Console and file logging setup
//!
//! Every user-visible message goes through `tracing`, so errors land both
//! on the console and in a persisted `modcheck.log` the user can send
//! along when reporting a problem.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::Result;

/// Initialize the global subscriber with a console layer and a file layer.
///
/// The returned guard must be held for the lifetime of the process; the
/// file writer flushes on drop.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init(verbose: bool, log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file = tracing_appender::rolling::never(log_dir, "modcheck.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}
