// src/core/validator.rs

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Raised when the user's input is not an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid URL {input:?}: {reason}")]
pub struct InvalidUrl {
    pub input: String,
    pub reason: String,
}

/// Parses `input` as an absolute URL with an explicit scheme.
///
/// Any scheme the parser accepts is allowed; unsupported ones surface later
/// as fetch errors. Surrounding whitespace is ignored.
pub fn validate_url(input: &str) -> Result<Url, InvalidUrl> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        debug!("Rejected empty URL input.");
        return Err(InvalidUrl {
            input: input.to_string(),
            reason: "empty input".to_string(),
        });
    }

    Url::parse(trimmed).map_err(|e| {
        debug!(input = trimmed, error = %e, "Rejected URL input.");
        InvalidUrl {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}
