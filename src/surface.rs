//! Presentation surface: where results and notices are shown.
//!
//! The controller only talks to the [`Surface`] and [`Browser`] traits. The
//! terminal implementation renders a numbered table with comfy-table and opens
//! links with the platform's default handler.

use crate::article::ArticleRecord;
use crate::error::{AppError, Result};
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use std::fmt;
use std::io::Write;
use tracing::warn;
use url::Url;

/// Maximum characters shown per column before truncation
const TITLE_MAX: usize = 70;
const AUTHOR_MAX: usize = 40;

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// A message box: level, title and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Something that can display the result table and notices
pub trait Surface {
    /// Replace all displayed rows
    fn render(&mut self, records: &[ArticleRecord]);
    /// Remove all displayed rows
    fn clear(&mut self);
    fn notify(&mut self, notice: &Notice);
}

/// Something that can open a link
pub trait Browser {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens links with the system default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| AppError::Browser(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Browser(format!("refusing to open '{}'", url)));
        }
        webbrowser::open(parsed.as_str()).map_err(|e| AppError::Browser(e.to_string()))
    }
}

/// Build the results table shown in the terminal
pub fn results_table(records: &[ArticleRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Author", "Year", "Link"]);

    for (idx, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(truncate(record.display_title(), TITLE_MAX)).add_attribute(Attribute::Bold),
            Cell::new(truncate(&record.author_line(), AUTHOR_MAX)),
            Cell::new(record.year_label()),
            Cell::new(record.display_url()),
        ]);
    }

    table
}

/// Cut to `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Terminal front end writing to any `Write` (stdout in the binary)
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.out
    }

    /// Free-form text (banner, help, footer)
    pub fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, records: &[ArticleRecord]) {
        let table = results_table(records);
        self.print(&table.to_string());
        self.print(&format!("{} result(s). Use 'open <#>' to open a link.", records.len()));
    }

    fn clear(&mut self) {
        self.print("Results cleared.");
    }

    fn notify(&mut self, notice: &Notice) {
        self.print(&format!("[{}] {}: {}", notice.level, notice.title, notice.message));
    }
}
