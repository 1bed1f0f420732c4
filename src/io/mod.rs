//! Table ingestion and report output.
//!
//! Reads the exam book and the availability sheet from CSV exports, and
//! writes the assignment and schedule tables back out as CSV.
//!
//! Supported date formats: `YYYY-MM-DD`, `MM/DD/YYYY`, and
//! `YYYY-MM-DD HH:MM:SS` (spreadsheet exports of date cells).

mod availability;
mod exam_book;
mod report;

pub use availability::{load_availability, read_availability};
pub use exam_book::ExamBook;
pub use report::{write_assignments, write_schedule};

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::io::Read;

use crate::error::Result;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a date cell or header.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

/// Reads a headed CSV into trimmed headers and trimmed rows.
///
/// Fully blank rows are skipped. Each returned row carries its 1-based
/// data row number.
fn read_table<R: Read>(reader: R) -> Result<(Vec<String>, Vec<(usize, Vec<String>)>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push((idx + 1, cells));
    }

    Ok((headers, rows))
}
