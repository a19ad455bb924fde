// src/app.rs

use std::io::{self, BufRead, Write};

use chrono::Utc;
use rust_i18n::t;
use tracing::{error, info};
use url::Url;

use crate::config::Config;
use crate::core::models::InspectionOutcome;
use crate::core::scanner::fetcher::HeaderSource;
use crate::core::scanner::run_inspection;
use crate::core::validator::validate_url;
use crate::ui::build_report;
use crate::ui::pdf::write_pdf;
use crate::ui::terminal::TerminalRenderer;

/// How a run of the shell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Normal,
    InvalidUrl,
}

/// The steps of one inspection, in the order they happen.
#[derive(Debug)]
pub enum AppState {
    AwaitingUrl,
    Fetching { input: String, url: Url },
    AwaitingSaveChoice { input: String, outcome: InspectionOutcome },
    Finished(ExitStatus),
}

/// The interactive shell: one URL in, one report out, then exit.
///
/// Streams and the header source are injected so the whole flow runs
/// against in-memory buffers in tests.
pub struct App<'a, S, R, W, E> {
    source: &'a S,
    config: &'a Config,
    renderer: TerminalRenderer,
    input: R,
    out: W,
    err: E,
}

impl<'a, S, R, W, E> App<'a, S, R, W, E>
where
    S: HeaderSource,
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(source: &'a S, config: &'a Config, colored: bool, input: R, out: W, err: E) -> Self {
        Self {
            source,
            config,
            renderer: TerminalRenderer::new(colored),
            input,
            out,
            err,
        }
    }

    pub async fn run(mut self) -> io::Result<ExitStatus> {
        writeln!(self.out, "{}", t!("shell.welcome", locale = self.config.locale.as_str()))?;
        let mut state = AppState::AwaitingUrl;
        loop {
            state = match state {
                AppState::Finished(status) => {
                    info!(?status, "Shell finished.");
                    return Ok(status);
                }
                other => self.step(other).await?,
            };
        }
    }

    async fn step(&mut self, state: AppState) -> io::Result<AppState> {
        match state {
            AppState::AwaitingUrl => {
                let input = self.prompt(&t!("shell.prompt_url", locale = self.config.locale.as_str()))?;
                match validate_url(&input) {
                    Ok(url) => Ok(AppState::Fetching { input, url }),
                    Err(e) => {
                        error!(error = %e, "URL validation failed.");
                        writeln!(self.err, "{}", t!("shell.invalid_url", locale = self.config.locale.as_str()))?;
                        Ok(AppState::Finished(ExitStatus::InvalidUrl))
                    }
                }
            }
            AppState::Fetching { input, url } => {
                writeln!(self.out, "\n{}\n", t!("shell.connecting", locale = self.config.locale.as_str(), url = input.as_str()))?;
                let outcome = run_inspection(self.source, &url).await;
                let lines = build_report(&input, &outcome, &self.config.locale);
                self.renderer.render(&mut self.out, &lines)?;
                Ok(AppState::AwaitingSaveChoice { input, outcome })
            }
            AppState::AwaitingSaveChoice { input, outcome } => {
                writeln!(self.out)?;
                let answer = self.prompt(&t!("shell.prompt_pdf", locale = self.config.locale.as_str()))?;
                if answer.eq_ignore_ascii_case(&t!("shell.affirmative", locale = self.config.locale.as_str())) {
                    self.save_pdf(&input, &outcome)?;
                } else {
                    info!("PDF export declined.");
                    writeln!(self.out, "\n{}", t!("shell.pdf_skipped", locale = self.config.locale.as_str()))?;
                }
                Ok(AppState::Finished(ExitStatus::Normal))
            }
            AppState::Finished(status) => Ok(AppState::Finished(status)),
        }
    }

    fn save_pdf(&mut self, input: &str, outcome: &InspectionOutcome) -> io::Result<()> {
        match write_pdf(&self.config.output_dir, input, outcome, Utc::now(), &self.config.locale) {
            Ok(path) => {
                let file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                writeln!(self.out, "\n{}", t!("shell.pdf_saved", locale = self.config.locale.as_str(), file = file))
            }
            Err(e) => {
                error!(error = %e, "PDF export failed.");
                writeln!(self.err, "{}", t!("shell.pdf_failed", locale = self.config.locale.as_str(), reason = e.to_string()))
            }
        }
    }

    /// Shows `question` and reads one trimmed answer; end of input reads as empty.
    fn prompt(&mut self, question: &str) -> io::Result<String> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
