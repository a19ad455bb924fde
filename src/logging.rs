// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LOG_ENV, LOG_FILE};

/// Directory holding the log file: the per-user local data dir, or `./.data`
/// when no home directory can be resolved.
pub fn log_directory() -> PathBuf {
    ProjectDirs::from("org", "HeaderInspector", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".data"))
}

/// Filter directive: `RUST_LOG`, then the crate's own variable, then `info` for this crate.
fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .or_else(|| lookup(LOG_ENV.as_str()))
        .unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Sends tracing output to `<log_directory>/header-inspector.log`.
///
/// Returns the log file path. stdout and stderr stay free for the prompts.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = log_directory();
    fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = File::create(&log_path)?;

    let filter = EnvFilter::new(log_filter(|name| std::env::var(name).ok()));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(log_path)
}
