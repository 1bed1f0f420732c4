//! Exam book ingestion.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{parse_date, read_table};
use crate::error::{ProctorError, Result};
use crate::models::{ExamRoomSession, Session};

const COURSE: &str = "CourseCode";
const DAY: &str = "Day";
const TIME: &str = "Time";
const ROOM: &str = "Room";
const SECTION: &str = "Section";
const TYPE: &str = "Type";
const ACTIVE: &str = "Active";

/// The catalog of room-sessions read from an exam-book export.
#[derive(Debug, Clone, Default)]
pub struct ExamBook {
    /// All rows, in file order.
    pub sessions: Vec<ExamRoomSession>,
}

impl ExamBook {
    /// Reads an exam-book CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let book = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), rows = book.len(), "exam book loaded");
        Ok(book)
    }

    /// Reads exam-book CSV data.
    ///
    /// # Errors
    /// `Configuration` naming the data row for a missing `CourseCode`,
    /// `Day`, `Time`, `Room`, `Type` or `Active`, an unknown `Time`, an
    /// unparseable date, or a negative count.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let (headers, rows) = read_table(reader)?;
        let column = |name: &str| headers.iter().position(|h| h == name);
        let columns = Columns {
            course: column(COURSE),
            day: column(DAY),
            time: column(TIME),
            room: column(ROOM),
            section: column(SECTION),
            kind: column(TYPE),
            active: column(ACTIVE),
        };

        let sessions = rows
            .iter()
            .map(|(row, cells)| columns.parse(*row, cells))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sessions })
    }

    /// Rows that need proctors: students present and not a holding section.
    pub fn active_sessions(&self, holding_sections: &[u32]) -> Vec<ExamRoomSession> {
        let active: Vec<ExamRoomSession> = self
            .sessions
            .iter()
            .filter(|s| s.is_active(holding_sections))
            .cloned()
            .collect();
        debug!(
            total = self.sessions.len(),
            active = active.len(),
            "exam book filtered"
        );
        active
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the book has no rows.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

struct Columns {
    course: Option<usize>,
    day: Option<usize>,
    time: Option<usize>,
    room: Option<usize>,
    section: Option<usize>,
    kind: Option<usize>,
    active: Option<usize>,
}

impl Columns {
    fn parse(&self, row: usize, cells: &[String]) -> Result<ExamRoomSession> {
        let course = required(row, cells, self.course, COURSE)?;
        let day_text = required(row, cells, self.day, DAY)?;
        let time = required(row, cells, self.time, TIME)?;
        let room = required(row, cells, self.room, ROOM)?;
        let kind = required(row, cells, self.kind, TYPE)?;
        let active_text = required(row, cells, self.active, ACTIVE)?;

        let day = parse_date(day_text).ok_or_else(|| {
            ProctorError::configuration(row, format!("unparseable Day: {day_text}"))
        })?;
        let session = Session::parse(time)
            .ok_or_else(|| ProctorError::configuration(row, format!("unknown Time: {time}")))?;
        let active = parse_count(row, ACTIVE, active_text)?;

        let section = match cell(cells, self.section) {
            Some(text) => parse_count(row, SECTION, text)?,
            None => 0,
        };

        Ok(ExamRoomSession::new(course, day, session, room)
            .with_section(section)
            .with_type(kind)
            .with_active(active))
    }
}

fn cell(cells: &[String], column: Option<usize>) -> Option<&str> {
    column
        .and_then(|i| cells.get(i))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn required<'a>(
    row: usize,
    cells: &'a [String],
    column: Option<usize>,
    name: &str,
) -> Result<&'a str> {
    cell(cells, column).ok_or_else(|| ProctorError::configuration(row, format!("missing {name}")))
}

fn parse_count(row: usize, name: &str, text: &str) -> Result<u32> {
    // Spreadsheet exports may write integers as "12.0"
    let value: f64 = text
        .parse()
        .map_err(|_| ProctorError::configuration(row, format!("{name} is not a number: {text}")))?;
    if value < 0.0 {
        return Err(ProctorError::configuration(
            row,
            format!("negative {name} count: {text}"),
        ));
    }
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ProctorError::configuration(
            row,
            format!("{name} is not a whole number: {text}"),
        ));
    }
    Ok(value as u32)
}
