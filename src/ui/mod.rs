// src/ui/mod.rs

// Presentation backends. Both consume the same line model built here, so the
// terminal output and the PDF document always carry the same content.
pub mod pdf;
pub mod terminal;

use rust_i18n::t;
use strum::IntoEnumIterator;

use crate::core::models::{
    FetchError, HeaderStatus, InspectionOutcome, SecurityHeader, SensitiveHeader, TrackedHeader,
};

/// One line of a rendered report, before any styling is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Title(String),
    /// Secondary information under the title (e.g. a timestamp).
    Note(String),
    Section(String),
    /// `label` is the localized form of `status`.
    SecurityEntry { text: String, status: HeaderStatus, label: String },
    SensitiveEntry(String),
    Error(String),
    Blank,
}

/// Text shown for a header value, substituting the sentinel for missing ones.
pub fn display_value(value: Option<&str>, locale: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => t!("report.not_configured", locale = locale).to_string(),
    }
}

pub fn status_label(status: HeaderStatus, locale: &str) -> String {
    match status {
        HeaderStatus::Present => t!("report.present", locale = locale).to_string(),
        HeaderStatus::Absent => t!("report.absent", locale = locale).to_string(),
    }
}

/// The user-facing message for a failed fetch.
pub fn error_message(error: &FetchError, locale: &str) -> String {
    let message = match error {
        FetchError::Timeout => t!("report.timeout", locale = locale).to_string(),
        FetchError::Request(message) => message.clone(),
    };
    t!("report.error", locale = locale, message = message).to_string()
}

fn entry_text<K: TrackedHeader>(key: K, value: Option<&str>, locale: &str) -> String {
    format!("- {}: {}", key.display_name(), display_value(value, locale))
}

/// Lays out an inspection outcome as report lines.
///
/// A failed fetch yields the error line alone.
pub fn build_report(url: &str, outcome: &InspectionOutcome, locale: &str) -> Vec<ReportLine> {
    let report = match outcome {
        Ok(report) => report,
        Err(e) => return vec![ReportLine::Error(error_message(e, locale))],
    };

    let mut lines = vec![
        ReportLine::Title(t!("report.title", locale = locale, url = url).to_string()),
        ReportLine::Blank,
        ReportLine::Section(t!("report.security_section", locale = locale).to_string()),
    ];
    for key in SecurityHeader::iter() {
        let value = report.security_value(key);
        let status = HeaderStatus::of(value);
        lines.push(ReportLine::SecurityEntry {
            text: entry_text(key, value, locale),
            status,
            label: status_label(status, locale),
        });
    }

    lines.push(ReportLine::Blank);
    lines.push(ReportLine::Section(t!("report.sensitive_section", locale = locale).to_string()));
    for key in SensitiveHeader::iter() {
        lines.push(ReportLine::SensitiveEntry(entry_text(
            key,
            report.sensitive_value(key),
            locale,
        )));
    }
    lines
}
