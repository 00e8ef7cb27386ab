//! Tracing subscriber setup for portal binaries

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Error, Result};

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber
///
/// Logs go to stderr unless `logging.file` is set, in which case they are
/// appended to that file without ANSI colors.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(&logging.level);

    let installed = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| Error::Config(format!("Logging init failed: {}", e)))
}
