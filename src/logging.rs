use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Subscriber appending plain-text lines to the configured log file.
///
/// Not installed here; the binary makes it global, tests can scope it with
/// `tracing::subscriber::with_default`.
pub fn file_subscriber(
    config: &LogConfig,
) -> anyhow::Result<impl tracing::Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .with_context(|| format!("opening log file {}", config.file.display()))?;

    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter `{}`", config.filter))?;

    Ok(tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter))
}

pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(file_subscriber(config)?)
        .context("installing log subscriber")
}
