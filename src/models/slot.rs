//! Proctor slot model.
//!
//! A slot is one unit of staffing demand: one proctor seat in one
//! room-session. Slots are created by the demand calculator and carry a
//! difficulty score that never changes afterwards.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ExamRoomSession, Session};
use chrono::NaiveDate;

/// One staffing requirement for a room-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProctorSlot {
    /// Room-session this slot belongs to (shared by all its slots).
    pub session: Arc<ExamRoomSession>,
    /// Position within the room-session (1-based, unique per session).
    pub slot_index: u32,
    /// Burden of covering this slot.
    pub difficulty: f64,
}

impl ProctorSlot {
    /// Creates a slot.
    pub fn new(session: Arc<ExamRoomSession>, slot_index: u32, difficulty: f64) -> Self {
        Self {
            session,
            slot_index,
            difficulty,
        }
    }

    /// Testing day.
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.session.day
    }

    /// AM or PM block.
    #[inline]
    pub fn exam_session(&self) -> Session {
        self.session.session
    }

    /// Room identifier.
    #[inline]
    pub fn room(&self) -> &str {
        &self.session.room
    }

    /// Course code.
    #[inline]
    pub fn course_code(&self) -> &str {
        &self.session.course_code
    }
}
