// src/core/scanner/headers_scanner.rs

use tracing::{debug, info, warn};
use crate::core::models::{
    HeaderValues, InspectionReport, SecurityHeader, SensitiveHeader, TrackedHeader,
};
use reqwest::header::HeaderMap;

/// Stands in for a header value that is present but not valid UTF-8.
pub const INVALID_UTF8_PLACEHOLDER: &str = "[Invalid UTF-8]";

/// Looks up a single tracked header in a `HeaderMap`.
///
/// `HeaderMap` stores names lowercased, so the lookup is case-insensitive.
/// Repeated headers are merged into one value joined by `", "`, in the order
/// they arrived. Missing headers and headers whose values are all empty yield
/// `None`; nothing about the value's content is interpreted.
fn check_header<K: TrackedHeader>(headers: &HeaderMap, key: K) -> Option<String> {
    let name = key.wire_name();
    debug!(header_name = %name, "Checking for header.");

    let parts: Vec<String> = headers
        .get_all(name.as_str())
        .iter()
        .filter_map(|value| match std::str::from_utf8(value.as_bytes()) {
            Ok(s) if s.is_empty() => None,
            Ok(s) => Some(s.to_string()),
            Err(_) => {
                warn!(header_name = %name, "Header found but contained invalid UTF-8.");
                Some(INVALID_UTF8_PLACEHOLDER.to_string())
            }
        })
        .collect();

    if parts.is_empty() {
        debug!(header_name = %name, "Header not found.");
        None
    } else {
        let value = parts.join(", ");
        debug!(header_name = %name, value = %value, "Header found.");
        Some(value)
    }
}

fn collect_headers<K: TrackedHeader>(headers: &HeaderMap) -> HeaderValues<K> {
    K::iter().map(|key| (key, check_header(headers, key))).collect()
}

/// Classifies a response's headers into an `InspectionReport`.
///
/// Pure and deterministic: the same `HeaderMap` always yields an equal report.
pub fn classify_headers(headers: &HeaderMap) -> InspectionReport {
    let report = InspectionReport {
        security: collect_headers::<SecurityHeader>(headers),
        sensitive: collect_headers::<SensitiveHeader>(headers),
    };
    info!(
        present = report.present_count(),
        tracked = report.security.len(),
        "Headers classified."
    );
    report
}
