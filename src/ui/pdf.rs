// src/ui/pdf.rs

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Rgb};
use rust_i18n::t;
use thiserror::Error;
use tracing::{debug, info};

use super::{build_report, ReportLine};
use crate::core::models::InspectionOutcome;

/// Prefix of every report file name.
pub const FILE_PREFIX: &str = "Relatorio_";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const WRAP_INDENT: f32 = 4.0;
/// Roughly what fits in the text width at the entry font size.
const WRAP_COLUMNS: usize = 85;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not write report file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build PDF document: {0}")]
    Pdf(String),
}

/// Derives the report file name from the URL as the user typed it.
///
/// `https://example.com/a/b` becomes `Relatorio_example.com_a_b.pdf`. Names
/// are not unique; a later report for the same URL overwrites the earlier one.
pub fn pdf_file_name(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("{}{}.pdf", FILE_PREFIX, stripped.replace('/', "_"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ink {
    Black,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedText {
    text: String,
    size: f32,
    x: f32,
    y: f32,
    bold: bool,
    ink: Ink,
}

/// Splits `text` into rows of at most `columns` characters, preferring spaces.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let mut word = word.to_string();
        while word.chars().count() > columns {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(columns).collect();
            word = word.chars().skip(columns).collect();
            rows.push(head);
        }
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > columns && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Places report lines on A4 pages, starting a new page when one fills up.
fn layout_pages(lines: &[ReportLine]) -> Vec<Vec<PlacedText>> {
    let mut pages = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        // (text, font size, row height, bold, ink)
        let (text, size, height, bold, ink) = match line {
            ReportLine::Title(text) => (text.clone(), 16.0, 9.0, true, Ink::Black),
            ReportLine::Note(text) => (text.clone(), 10.0, 6.0, false, Ink::Black),
            ReportLine::Section(text) => (text.clone(), 14.0, 8.0, true, Ink::Black),
            ReportLine::SecurityEntry { text, label, .. } => (
                format!("{} [{}]", text, label),
                11.0,
                6.0,
                false,
                Ink::Black,
            ),
            ReportLine::SensitiveEntry(text) => (text.clone(), 11.0, 6.0, false, Ink::Black),
            ReportLine::Error(text) => (text.clone(), 12.0, 7.0, false, Ink::Red),
            ReportLine::Blank => {
                y -= 4.0;
                continue;
            }
        };

        for (i, row) in wrap(&text, WRAP_COLUMNS).into_iter().enumerate() {
            if y - height < MARGIN {
                pages.push(Vec::new());
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= height;
            let x = if i == 0 { MARGIN } else { MARGIN + WRAP_INDENT };
            if let Some(page) = pages.last_mut() {
                page.push(PlacedText { text: row, size, x, y, bold, ink });
            }
        }
    }
    pages
}

fn builtin_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font).map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Builds the full line list for the PDF: the shared report plus a timestamp.
fn document_lines(
    url: &str,
    outcome: &InspectionOutcome,
    generated_at: DateTime<Utc>,
    locale: &str,
) -> Vec<ReportLine> {
    let mut lines = build_report(url, outcome, locale);
    if outcome.is_ok() {
        let timestamp = generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let note = t!("report.generated_at", locale = locale, timestamp = timestamp);
        lines.insert(1, ReportLine::Note(note.to_string()));
    }
    lines
}

/// Renders the outcome into `dir/Relatorio_<url>.pdf` and returns the path.
pub fn write_pdf(
    dir: &Path,
    url: &str,
    outcome: &InspectionOutcome,
    generated_at: DateTime<Utc>,
    locale: &str,
) -> Result<PathBuf, RenderError> {
    let path = dir.join(pdf_file_name(url));
    let pages = layout_pages(&document_lines(url, outcome, generated_at, locale));
    debug!(path = %path.display(), pages = pages.len(), "Laying out PDF report.");

    let title = t!("report.title", locale = locale, url = url).to_string();
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;

    for (index, placed) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", index + 1));
            doc.get_page(page).get_layer(layer)
        };
        for text in placed {
            let fill = match text.ink {
                Ink::Black => Rgb::new(0.0, 0.0, 0.0, None),
                Ink::Red => Rgb::new(0.8, 0.0, 0.0, None),
            };
            layer.set_fill_color(Color::Rgb(fill));
            let font = if text.bold { &bold } else { &regular };
            layer.use_text(text.text.clone(), text.size, Mm(text.x), Mm(text.y), font);
        }
    }

    let file = File::create(&path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    info!(path = %path.display(), "PDF report written.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{FetchError, SecurityHeader};
    use crate::ui::tests::report_with;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn file_name_strips_scheme_and_slashes() {
        assert_eq!(pdf_file_name("https://example.com/a/b"), "Relatorio_example.com_a_b.pdf");
        assert_eq!(pdf_file_name("http://example.com/"), "Relatorio_example.com_.pdf");
        assert_eq!(pdf_file_name("ftp://host/x"), "Relatorio_ftp:__host_x.pdf");
    }

    #[test]
    fn wrap_keeps_short_text_and_splits_long_text() {
        assert_eq!(wrap("short line", 20), vec!["short line"]);
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn error_document_holds_only_the_error_line() {
        let lines = document_lines("https://example.com", &Err(FetchError::Timeout), fixed_time(), "en");
        let pages = layout_pages(&lines);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 1);
        assert_eq!(pages[0][0].text, "Error: Timeout exceeded");
        assert_eq!(pages[0][0].ink, Ink::Red);
    }

    #[test]
    fn report_document_has_timestamp_and_status_labels() {
        let outcome = Ok(report_with(&[(SecurityHeader::XFrameOptions, "DENY")]));
        let pages = layout_pages(&document_lines("https://example.com", &outcome, fixed_time(), "en"));
        let texts: Vec<&str> = pages.iter().flatten().map(|p| p.text.as_str()).collect();

        assert_eq!(texts[0], "Inspection results for: https://example.com");
        assert_eq!(texts[1], "Generated at: 2024-05-01 12:30:00 UTC");
        assert!(texts.contains(&"- X-Frame-Options: DENY [Present]"));
        assert!(texts.contains(&"- Server: Not configured"));
    }

    #[test]
    fn long_reports_spill_onto_new_pages() {
        let lines: Vec<ReportLine> = (0..100).map(|i| ReportLine::SensitiveEntry(format!("- line {}", i))).collect();
        let pages = layout_pages(&lines);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.iter().all(|p| p.y >= MARGIN && p.y <= PAGE_HEIGHT - MARGIN));
        }
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 100);
    }

    #[test]
    fn writes_a_pdf_file_into_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = Ok(report_with(&[(SecurityHeader::ContentSecurityPolicy, "default-src 'self'")]));

        let path = write_pdf(dir.path(), "https://example.com/a/b", &outcome, fixed_time(), "en").unwrap();

        assert_eq!(path, dir.path().join("Relatorio_example.com_a_b.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn same_name_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_pdf(dir.path(), "https://example.com", &Ok(report_with(&[])), fixed_time(), "en").unwrap();
        let second = write_pdf(dir.path(), "https://example.com", &Err(FetchError::Timeout), fixed_time(), "pt").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
