//! Tracing subscriber setup for the binary.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable holding a filter directive that overrides the config.
pub const LOG_ENV: &str = "CREPLAY_LOG";

/// Where log output goes when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Discard; stderr belongs to the terminal UI
    Silent,
}

/// Build the filter from `CREPLAY_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<()> {
    let filter = env_filter(&config.level);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (&config.file, target) {
        (Some(path), _) => {
            let file = open_log_file(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        (None, LogTarget::Stderr) => builder.with_writer(io::stderr).try_init(),
        (None, LogTarget::Silent) => builder.with_writer(io::sink).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))
}
