// src/ui/terminal.rs

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use super::ReportLine;
use crate::core::models::HeaderStatus;

/// Writes report lines as a plain listing, optionally with ANSI colors.
///
/// Output depends only on the lines and the color flag, so rendering the same
/// report twice produces identical bytes.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    colored: bool,
}

impl TerminalRenderer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render<W: Write>(&self, out: &mut W, lines: &[ReportLine]) -> io::Result<()> {
        for line in lines {
            match line {
                ReportLine::Title(text) | ReportLine::Section(text) => {
                    self.styled(out, text, None, true)?
                }
                ReportLine::Note(text) | ReportLine::SensitiveEntry(text) => {
                    queue!(out, Print(text))?
                }
                ReportLine::SecurityEntry { text, status, label } => {
                    let (icon, color) = match status {
                        HeaderStatus::Present => ("✅", Color::Green),
                        HeaderStatus::Absent => ("⚠️", Color::Yellow),
                    };
                    queue!(out, Print(text), Print(" "))?;
                    let marker = format!("{} {}", icon, label);
                    self.styled(out, &marker, Some(color), false)?;
                }
                ReportLine::Error(text) => self.styled(out, text, Some(Color::Red), false)?,
                ReportLine::Blank => {}
            }
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }

    fn styled<W: Write>(&self, out: &mut W, text: &str, color: Option<Color>, bold: bool) -> io::Result<()> {
        if !self.colored {
            return queue!(out, Print(text));
        }
        if let Some(color) = color {
            queue!(out, SetForegroundColor(color))?;
        }
        if bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
    }
}
