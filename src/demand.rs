//! Proctor demand calculation.
//!
//! Converts exam room-sessions into a flat list of proctor slots. Every
//! slot of a room-session shares the session's difficulty score.
//!
//! # Difficulty
//!
//! | Accommodation | AM | PM |
//! |---------------|----|----|
//! | `2x` | ×2.0 | ×1.25 |
//! | `1.5x` / `enl` / `SCRIBE` | ×1.5 | ×1.25 |
//!
//! Rooms with a reader or scribe (`QR` / `SCRIBE`) are further weighted
//! by subject: English ×3.0, History ×2.0, other ×1.5.
//!
//! # Slot Count
//!
//! | Condition (first match) | Proctors |
//! |-------------------------|----------|
//! | scribe (any case) | 3 per active student |
//! | `QR` | 3 |
//! | PM session | 2 |
//! | `2x` | 3 |
//! | otherwise | 2 |

use std::sync::Arc;

use tracing::debug;

use crate::error::{ProctorError, Result};
use crate::models::{ExamRoomSession, ProctorSlot, Session, Subject};

/// Difficulty score of a room-session.
pub fn difficulty(session: &ExamRoomSession) -> f64 {
    let flags = &session.accommodation;
    let is_am = session.session == Session::Am;
    let mut base = 1.0;

    if flags.double_time {
        base *= if is_am { 2.0 } else { 1.25 };
    } else if flags.is_extended() {
        base *= if is_am { 1.5 } else { 1.25 };
    }

    if flags.needs_reader() {
        base *= match session.subject() {
            Subject::English => 3.0,
            Subject::History => 2.0,
            Subject::Other => 1.5,
        };
    }

    base
}

/// Number of proctors a room-session needs.
///
/// `None` if a scribe room's per-student count overflows.
pub fn slot_count(session: &ExamRoomSession) -> Option<u32> {
    let flags = &session.accommodation;
    if flags.scribe_any_case {
        session.active.checked_mul(3)
    } else if flags.read_aloud {
        Some(3)
    } else if session.session == Session::Pm {
        Some(2)
    } else if flags.double_time {
        Some(3)
    } else {
        Some(2)
    }
}

/// Expands room-sessions into proctor slots.
#[derive(Debug, Clone, Default)]
pub struct DemandCalculator {
    holding_sections: Vec<u32>,
}

impl DemandCalculator {
    /// Creates a calculator with no reserved holding sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reserved sections that upstream filtering removes.
    pub fn with_holding_sections(mut self, sections: Vec<u32>) -> Self {
        self.holding_sections = sections;
        self
    }

    /// Builds slots for all room-sessions, in input order.
    ///
    /// Rows must already be filtered to active sessions. A row that is not
    /// (no active students, or a holding section) is rejected rather than
    /// silently producing zero demand.
    pub fn slots(&self, sessions: &[ExamRoomSession]) -> Result<Vec<ProctorSlot>> {
        let mut slots = Vec::new();

        for (idx, session) in sessions.iter().enumerate() {
            if !session.is_active(&self.holding_sections) {
                return Err(ProctorError::configuration(
                    idx + 1,
                    format!(
                        "inactive room-session {} room {} section {} reached demand calculation",
                        session.course_code, session.room, session.section
                    ),
                ));
            }

            let score = difficulty(session);
            let count = slot_count(session).ok_or_else(|| {
                ProctorError::configuration(
                    idx + 1,
                    format!(
                        "scribe room {} room {} has too many students: {}",
                        session.course_code, session.room, session.active
                    ),
                )
            })?;
            debug!(
                course = %session.course_code,
                room = %session.room,
                day = %session.day,
                session = %session.session,
                count,
                difficulty = score,
                "room-session demand"
            );

            let shared = Arc::new(session.clone());
            slots.extend((1..=count).map(|i| ProctorSlot::new(Arc::clone(&shared), i, score)));
        }

        Ok(slots)
    }
}
