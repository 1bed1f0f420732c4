//! Availability sheet ingestion.
//!
//! The sheet is wide: `Name`, `Dept` and `Session` columns followed by
//! one column per testing day. Headers that are neither known columns nor
//! dates are ignored.

use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{parse_date, read_table};
use crate::availability::AvailabilityRegistry;
use crate::error::{ProctorError, Result};
use crate::models::{DayStatus, SessionPreference, StaffMember};

const NAME: &str = "Name";
const DEPT: &str = "Dept";
const SESSION: &str = "Session";

/// Reads an availability CSV file.
pub fn load_availability(path: impl AsRef<Path>) -> Result<AvailabilityRegistry> {
    let path = path.as_ref();
    let registry = read_availability(File::open(path)?)?;
    info!(
        path = %path.display(),
        staff = registry.staff().len(),
        days = registry.days().count(),
        "availability loaded"
    );
    Ok(registry)
}

/// Reads availability CSV data into a registry.
///
/// # Errors
/// `Configuration` if the `Name` or `Session` column is missing, a name
/// is empty or repeated, or a `Session` value is not `Early`/`Late`.
pub fn read_availability<R: Read>(reader: R) -> Result<AvailabilityRegistry> {
    let (headers, rows) = read_table(reader)?;

    let find = |name: &str| headers.iter().position(|h| h == name);
    let name_col = find(NAME)
        .ok_or_else(|| ProctorError::configuration(0, "availability has no Name column"))?;
    let session_col = find(SESSION)
        .ok_or_else(|| ProctorError::configuration(0, "availability has no Session column"))?;
    let dept_col = find(DEPT);

    let mut day_cols: Vec<(usize, NaiveDate)> = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        if i == name_col || i == session_col || Some(i) == dept_col {
            continue;
        }
        match parse_date(header) {
            Some(day) => day_cols.push((i, day)),
            None => debug!(header = %header, "ignoring non-day column"),
        }
    }

    let mut staff = Vec::with_capacity(rows.len());
    for (row, cells) in &rows {
        let name = text(cells, name_col);
        if name.is_empty() {
            return Err(ProctorError::configuration(*row, "missing Name"));
        }

        let pref_text = text(cells, session_col);
        let preference = SessionPreference::parse(pref_text).ok_or_else(|| {
            ProctorError::configuration(*row, format!("unknown Session for {name}: {pref_text}"))
        })?;

        let mut member = StaffMember::new(name, preference);
        if let Some(i) = dept_col {
            member = member.with_department(text(cells, i));
        }
        for &(i, day) in &day_cols {
            member = member.with_status(day, DayStatus::parse(text(cells, i)));
        }
        staff.push(member);
    }

    // Staff rows are numbered by position; map duplicate errors back to file rows
    AvailabilityRegistry::new(day_cols.iter().map(|&(_, day)| day), staff).map_err(|e| match e {
        ProctorError::Configuration { row, message } if row > 0 && row <= rows.len() => {
            ProctorError::configuration(rows[row - 1].0, message)
        }
        other => other,
    })
}

fn text(cells: &[String], i: usize) -> &str {
    cells.get(i).map(String::as_str).unwrap_or("")
}
