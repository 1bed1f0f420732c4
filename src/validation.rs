//! Input validation for proctor scheduling.
//!
//! Checks the exam book against the availability sheet before a run.
//! Detects:
//! - Duplicate room-sessions
//! - Inactive rows that should have been filtered upstream
//! - Exam days with no availability column
//! - Days whose demand exceeds the staff available to proctor
//!
//! The last check is a sufficient condition for failure, not a necessary
//! one: late PM slot restrictions can still make a run infeasible.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::availability::AvailabilityRegistry;
use crate::demand::slot_count;
use crate::models::{ExamRoomSession, Session};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rows describe the same course, room, section and session.
    DuplicateRoomSession,
    /// A row with no active students or in a holding section.
    InactiveSession,
    /// An exam day has no availability column.
    UnknownDay,
    /// A day needs more proctors than there are staff able to proctor.
    InsufficientStaff,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates room-sessions against the availability registry.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    sessions: &[ExamRoomSession],
    registry: &AvailabilityRegistry,
    holding_sections: &[u32],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen: HashSet<(NaiveDate, Session, &str, u32, &str)> = HashSet::new();
    for s in sessions {
        let key = (s.day, s.session, s.room.as_str(), s.section, s.course_code.as_str());
        if !seen.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomSession,
                format!(
                    "Duplicate room-session: {} room {} section {} on {} {}",
                    s.course_code, s.room, s.section, s.day, s.session
                ),
            ));
        }

        if !s.is_active(holding_sections) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InactiveSession,
                format!(
                    "Inactive room-session: {} room {} section {} ({} active)",
                    s.course_code, s.room, s.section, s.active
                ),
            ));
        }
    }

    // Demand per day; one proctor covers at most one slot a day
    let mut demand: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for s in sessions.iter().filter(|s| s.is_active(holding_sections)) {
        let needed = demand.entry(s.day).or_insert(0);
        *needed = needed.saturating_add(slot_count(s).unwrap_or(u32::MAX));
    }

    for (day, needed) in demand {
        if !registry.has_day(day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!("Exam day {day} has no availability column"),
            ));
            continue;
        }

        let available = registry.proctor_count(day);
        if needed as usize > available {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientStaff,
                format!("Day {day} needs {needed} proctors but only {available} are available"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
