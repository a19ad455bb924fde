// src/core/scanner/mod.rs

// Public interface of the `scanner` module: the network seam and the classifier.
pub mod fetcher;
pub mod headers_scanner;

use tracing::{info, warn};
use url::Url;

use crate::core::models::InspectionOutcome;
use self::fetcher::HeaderSource;
use self::headers_scanner::classify_headers;

/// Fetches the headers for `url` once and classifies them.
///
/// Fetch failures are turned into the error variant of the outcome here, so
/// nothing escapes past this boundary.
pub async fn run_inspection<S: HeaderSource>(source: &S, url: &Url) -> InspectionOutcome {
    info!(url = %url, "Starting header inspection.");
    match source.fetch_headers(url).await {
        Ok(headers) => Ok(classify_headers(&headers)),
        Err(e) => {
            warn!(url = %url, error = %e, "Header inspection failed.");
            Err(e)
        }
    }
}
