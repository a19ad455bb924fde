// src/main.rs

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use tracing::info;

// Load translations before any module that uses `t!`.
rust_i18n::i18n!("locales", fallback = "en");

mod app;
mod config;
mod core;
mod logging;
mod ui;

use app::{App, ExitStatus};
use config::Config;
use crate::core::scanner::fetcher::HttpHeaderSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = logging::initialize_logging() {
        eprintln!("warning: file logging disabled: {}", e);
    }

    let config = Config::from_env();
    rust_i18n::set_locale(&config.locale);
    info!(?config, "Starting header inspector.");

    let source = HttpHeaderSource::new(config.timeout)?;
    let colored = config.color && io::stdout().is_terminal();
    let app = App::new(&source, &config, colored, io::stdin().lock(), io::stdout(), io::stderr());

    let status = app.run().await?;
    Ok(match status {
        ExitStatus::Normal => ExitCode::SUCCESS,
        ExitStatus::InvalidUrl => ExitCode::FAILURE,
    })
}
