//! Error types for proctor scheduling.
//!
//! Every variant is fatal to a scheduling run. There is no partial-result
//! mode: downstream reports assume every slot is filled.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Session;

/// Errors raised while loading inputs or scheduling proctors.
#[derive(Error, Debug)]
pub enum ProctorError {
    /// Malformed or missing required fields in an input row or config.
    #[error("configuration error (row {row}): {message}")]
    Configuration {
        /// 1-based data row, or 0 when not tied to a row.
        row: usize,
        /// Human-readable description.
        message: String,
    },

    /// A slot has no eligible candidate left after same-day filtering.
    #[error(
        "no eligible proctor for {course} room {room} on {day} {session}, slot #{slot_index}"
    )]
    SchedulingInfeasible {
        /// Exam day.
        day: NaiveDate,
        /// Exam session.
        session: Session,
        /// Room identifier.
        room: String,
        /// Course code.
        course: String,
        /// 1-based slot index within the room-session.
        slot_index: u32,
    },

    /// A day/staff combination is absent from the availability registry.
    #[error("data dependency error ({staff} on {day}): {message}")]
    DataDependency {
        /// Day referenced.
        day: NaiveDate,
        /// Staff key referenced (empty when only the day is unknown).
        staff: String,
        /// Human-readable description.
        message: String,
    },

    /// File system error while reading or writing tables.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding or encoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Config file decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProctorError {
    /// Creates a configuration error tied to a data row.
    pub fn configuration(row: usize, message: impl Into<String>) -> Self {
        Self::Configuration {
            row,
            message: message.into(),
        }
    }

    /// Creates a data dependency error.
    pub fn data_dependency(
        day: NaiveDate,
        staff: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DataDependency {
            day,
            staff: staff.into(),
            message: message.into(),
        }
    }

    /// Whether this error names an unfillable slot.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::SchedulingInfeasible { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProctorError>;
