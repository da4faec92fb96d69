//! Spreadsheet export of the result set.
//!
//! The sheet layout is computed once by [`sheet_rows`] and then rendered either
//! as an `.xlsx` workbook (year column stored as a real date formatted `yyyy`)
//! or as CSV when the destination ends in `.csv`.

use crate::article::ArticleRecord;
use crate::error::ExportError;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Worksheet name
pub const SHEET_NAME: &str = "Search Results";

/// Header row
pub const HEADERS: [&str; 4] = ["Title", "Author", "Year", "Link"];

/// Column widths in character units, same order as [`HEADERS`]
const COLUMN_WIDTHS: [f64; 4] = [60.0, 40.0, 8.0, 45.0];

/// Number format applied to the year column
pub const YEAR_FORMAT: &str = "yyyy";

/// Number format for years written as plain numbers
const PLAIN_YEAR_FORMAT: &str = "0";

/// Years Excel can store as a date serial
const EXCEL_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// One cell of the exported sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCell {
    Text(String),
    /// January 1st of the publication year
    Year(NaiveDate),
    Blank,
}

/// Output format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }
}

/// Data rows (header excluded), one per record
pub fn sheet_rows(records: &[ArticleRecord]) -> Vec<[SheetCell; 4]> {
    records
        .iter()
        .map(|r| {
            [
                SheetCell::Text(r.display_title().to_string()),
                SheetCell::Text(r.author_line()),
                year_cell(r.year),
                SheetCell::Text(r.display_url().to_string()),
            ]
        })
        .collect()
}

fn year_cell(year: Option<i32>) -> SheetCell {
    year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .map(SheetCell::Year)
        .unwrap_or(SheetCell::Blank)
}

/// Add `.xlsx` when the path has no extension
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension("xlsx")
    } else {
        path.to_path_buf()
    }
}

/// File name used when the user gives no destination
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("search_results_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Write `records` to `path`.
///
/// Returns the path actually written (an `.xlsx` extension is appended when
/// missing).
pub fn export(records: &[ArticleRecord], path: &Path) -> Result<PathBuf, ExportError> {
    let path = resolve_path(path);
    let rows = sheet_rows(records);

    match ExportFormat::from_path(&path) {
        ExportFormat::Xlsx => write_xlsx(&rows, &path)?,
        ExportFormat::Csv => write_csv(&rows, &path)?,
    }

    info!(path = %path.display(), rows = rows.len(), "Exported results");
    Ok(path)
}

fn write_xlsx(rows: &[[SheetCell; 4]], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let year_format = Format::new().set_num_format(YEAR_FORMAT);
    let plain_year_format = Format::new().set_num_format(PLAIN_YEAR_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(idx + 1)
            .map_err(|_| ExportError::IoFailure("Too many rows for a worksheet".to_string()))?;

        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                SheetCell::Text(text) => {
                    worksheet.write_string(row_num, col, text.as_str())?;
                }
                SheetCell::Year(date) => match excel_date(date) {
                    Some(datetime) => {
                        worksheet.write_datetime_with_format(row_num, col, &datetime, &year_format)?;
                    }
                    None => {
                        debug!(row = row_num, year = date.year(), "Year outside date range, written as number");
                        worksheet.write_number_with_format(
                            row_num,
                            col,
                            f64::from(date.year()),
                            &plain_year_format,
                        )?;
                    }
                },
                SheetCell::Blank => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Spreadsheet date for January 1st, if the year is representable
fn excel_date(date: &NaiveDate) -> Option<ExcelDateTime> {
    let year = date.year();
    if !EXCEL_YEARS.contains(&year) {
        return None;
    }
    let year = u16::try_from(year).ok()?;
    ExcelDateTime::from_ymd(year, 1, 1).ok()
}

fn write_csv(rows: &[[SheetCell; 4]], path: &Path) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.write_record(row.iter().map(|cell| match cell {
            SheetCell::Text(text) => text.clone(),
            SheetCell::Year(date) => date.format("%Y").to_string(),
            SheetCell::Blank => String::new(),
        }))?;
    }

    wtr.flush()?;
    Ok(())
}
