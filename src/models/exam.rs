//! Exam room-session model.
//!
//! One row of the exam book: a course sitting in one room during one
//! session of a testing day, with the accommodation type of the students
//! seated there.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time block of a testing day.
///
/// Ordering follows the labels (`AM < PM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Session {
    /// Morning session.
    #[serde(rename = "AM")]
    Am,
    /// Afternoon session.
    #[serde(rename = "PM")]
    Pm,
}

impl Session {
    /// Parses an exam-book `Time` cell. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "AM" => Some(Self::Am),
            "PM" => Some(Self::Pm),
            _ => None,
        }
    }

    /// Label written to report tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject family, derived from the first letter of a course code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    /// Course codes starting with `E`.
    English,
    /// Course codes starting with `H`.
    History,
    /// Everything else.
    Other,
}

impl Subject {
    /// Classifies a course code.
    pub fn from_course_code(code: &str) -> Self {
        match code.chars().next() {
            Some('E') => Self::English,
            Some('H') => Self::History,
            _ => Self::Other,
        }
    }
}

/// Accommodation tokens of an exam-book `Type` cell.
///
/// The free-text type is scanned once here. Each flag records a plain
/// substring test against the raw text, so `"2x"` matches anywhere in the
/// string and the checks are case-sensitive, except `scribe_any_case`
/// which lowercases first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationFlags {
    /// Original `Type` text.
    pub raw: String,
    /// Contains `"2x"`.
    pub double_time: bool,
    /// Contains `"1.5x"`.
    pub time_and_half: bool,
    /// Contains `"enl"`.
    pub enl: bool,
    /// Contains `"SCRIBE"`.
    pub scribe: bool,
    /// Contains `"scribe"` in any letter case.
    pub scribe_any_case: bool,
    /// Contains `"QR"` (questions read aloud).
    pub read_aloud: bool,
}

impl AccommodationFlags {
    /// Scans a `Type` cell.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            double_time: raw.contains("2x"),
            time_and_half: raw.contains("1.5x"),
            enl: raw.contains("enl"),
            scribe: raw.contains("SCRIBE"),
            scribe_any_case: raw.to_lowercase().contains("scribe"),
            read_aloud: raw.contains("QR"),
            raw,
        }
    }

    /// Extended time of 1.5x, or a token that is staffed like it.
    pub fn is_extended(&self) -> bool {
        self.time_and_half || self.enl || self.scribe
    }

    /// Needs a reader or scribe, which weights difficulty by subject.
    pub fn needs_reader(&self) -> bool {
        self.read_aloud || self.scribe
    }
}

/// A course sitting in one room for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRoomSession {
    /// Course code (e.g. `"EXRC"`, `"HXRK"`).
    pub course_code: String,
    /// Testing day.
    pub day: NaiveDate,
    /// AM or PM block.
    pub session: Session,
    /// Room identifier.
    pub room: String,
    /// Exam-book section number.
    pub section: u32,
    /// Parsed accommodation type.
    pub accommodation: AccommodationFlags,
    /// Students actively sitting the exam in this room.
    pub active: u32,
}

impl ExamRoomSession {
    /// Creates a room-session with no accommodation and no students.
    pub fn new(
        course_code: impl Into<String>,
        day: NaiveDate,
        session: Session,
        room: impl Into<String>,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            day,
            session,
            room: room.into(),
            section: 1,
            accommodation: AccommodationFlags::default(),
            active: 0,
        }
    }

    /// Sets the section number.
    pub fn with_section(mut self, section: u32) -> Self {
        self.section = section;
        self
    }

    /// Sets the accommodation type from its raw text.
    pub fn with_type(mut self, raw: impl Into<String>) -> Self {
        self.accommodation = AccommodationFlags::parse(raw);
        self
    }

    /// Sets the active student count.
    pub fn with_active(mut self, active: u32) -> Self {
        self.active = active;
        self
    }

    /// Subject family of the course.
    pub fn subject(&self) -> Subject {
        Subject::from_course_code(&self.course_code)
    }

    /// Whether this row passes the upstream activity filter.
    pub fn is_active(&self, holding_sections: &[u32]) -> bool {
        self.active > 0 && !holding_sections.contains(&self.section)
    }
}
