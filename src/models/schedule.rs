//! Assignment and schedule (solution) models.
//!
//! An [`Assignment`] binds one proctor slot to one staff member. A
//! [`ProctorSchedule`] is the unified per-staff duty table: proctor
//! assignments merged with the fixed duties from the availability sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ProctorSlot, Session};

/// Duty label used for proctor assignments in the schedule table.
pub const PROCTOR_DUTY: &str = "Proctor";

/// A slot-to-staff assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Slot being covered.
    pub slot: ProctorSlot,
    /// Assigned staff key.
    pub staff: String,
    /// Difficulty added to the staff member's load.
    pub difficulty: f64,
    /// Staff member's cumulative load once this assignment was made.
    pub running_total: f64,
}

impl Assignment {
    /// Creates an assignment contributing the slot's difficulty.
    pub fn new(slot: ProctorSlot, staff: impl Into<String>) -> Self {
        let difficulty = slot.difficulty;
        Self {
            slot,
            staff: staff.into(),
            difficulty,
            running_total: difficulty,
        }
    }

    /// Sets the cumulative load recorded with this assignment.
    pub fn with_running_total(mut self, total: f64) -> Self {
        self.running_total = total;
        self
    }

    /// Testing day of the slot.
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.slot.day()
    }

    /// Session of the slot.
    #[inline]
    pub fn session(&self) -> Session {
        self.slot.exam_session()
    }
}

/// One row of the unified duty schedule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day of the duty.
    pub day: NaiveDate,
    /// Session, or `None` for day-level duties such as scoring.
    pub session: Option<Session>,
    /// Staff key.
    pub staff: String,
    /// Duty label (`"Proctor"` for assignments).
    pub duty: String,
}

impl ScheduleEntry {
    /// Creates a schedule row.
    pub fn new(
        day: NaiveDate,
        session: Option<Session>,
        staff: impl Into<String>,
        duty: impl Into<String>,
    ) -> Self {
        Self {
            day,
            session,
            staff: staff.into(),
            duty: duty.into(),
        }
    }

    /// Whether this row is a proctor assignment.
    pub fn is_proctor(&self) -> bool {
        self.duty == PROCTOR_DUTY
    }
}

/// The unified per-staff duty schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProctorSchedule {
    /// Rows in report order.
    pub entries: Vec<ScheduleEntry>,
}

impl ProctorSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a row.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Returns all rows for a staff member.
    pub fn entries_for_staff(&self, staff: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.staff == staff).collect()
    }

    /// Returns all rows on a day.
    pub fn entries_for_day(&self, day: NaiveDate) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.day == day).collect()
    }

    /// Number of proctor rows.
    pub fn proctor_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_proctor()).count()
    }

    /// Number of rows.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExamRoomSession;
    use std::sync::Arc;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_assignment_takes_slot_difficulty() {
        let session = Arc::new(ExamRoomSession::new("EXRC", d(17), Session::Pm, "221"));
        let a = Assignment::new(ProctorSlot::new(session, 2, 1.25), "Ada");
        assert!((a.difficulty - 1.25).abs() < 1e-10);
        assert!((a.running_total - 1.25).abs() < 1e-10);
        assert!((a.with_running_total(3.5).running_total - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_assignment_accessors() {
        let session = Arc::new(ExamRoomSession::new("EXRC", d(17), Session::Pm, "221"));
        let a = Assignment::new(ProctorSlot::new(session, 2, 1.25), "Ada");
        assert_eq!(a.day(), d(17));
        assert_eq!(a.session(), Session::Pm);
        assert_eq!(a.staff, "Ada");
    }

    #[test]
    fn test_schedule_queries() {
        let mut s = ProctorSchedule::new();
        s.add_entry(ScheduleEntry::new(d(17), Some(Session::Am), "Ada", PROCTOR_DUTY));
        s.add_entry(ScheduleEntry::new(d(17), None, "Bo", "ELA SCORING"));
        s.add_entry(ScheduleEntry::new(d(18), Some(Session::Pm), "Ada", "SUB PROCTOR"));

        assert_eq!(s.entry_count(), 3);
        assert_eq!(s.proctor_count(), 1);
        assert_eq!(s.entries_for_staff("Ada").len(), 2);
        assert_eq!(s.entries_for_day(d(17)).len(), 2);
        assert!(s.entries_for_staff("Cy").is_empty());
    }

    #[test]
    fn test_entry_ordering() {
        // Day first, then session
        let am = ScheduleEntry::new(d(17), Some(Session::Am), "Zed", "Proctor");
        let pm = ScheduleEntry::new(d(17), Some(Session::Pm), "Ada", "Proctor");
        let next = ScheduleEntry::new(d(18), Some(Session::Am), "Ada", "Proctor");
        assert!(am < pm);
        assert!(pm < next);
    }
}
