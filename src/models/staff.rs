//! Staff model.
//!
//! Staff members are the resources of proctor scheduling. Each carries a
//! session preference and a per-day status taken from the availability
//! sheet: free to proctor, booked on a fixed duty, or away.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Session;

/// Preferred half of the testing day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPreference {
    /// Prefers the AM session.
    Early,
    /// Prefers the PM session.
    Late,
}

impl SessionPreference {
    /// Parses an availability `Session` cell.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Early" => Some(Self::Early),
            "Late" => Some(Self::Late),
            _ => None,
        }
    }

    /// The exam session this preference maps to.
    pub fn session(&self) -> Session {
        match self {
            Self::Early => Session::Am,
            Self::Late => Session::Pm,
        }
    }

    /// Whether this preference matches the given session.
    pub fn matches(&self, session: Session) -> bool {
        self.session() == session
    }
}

/// Status of a staff member on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    /// Available for proctor assignment.
    Proctor,
    /// Booked on a fixed duty (e.g. `"SUB PROCTOR"`, `"ELA SCORING"`).
    FixedDuty(String),
    /// Not working exams that day.
    Unavailable,
}

impl DayStatus {
    /// Parses an availability day cell.
    ///
    /// Blank cells are `Unavailable`, `"Proctor"` (any case) is `Proctor`,
    /// anything else is a fixed duty label.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Unavailable
        } else if value.eq_ignore_ascii_case("proctor") {
            Self::Proctor
        } else {
            Self::FixedDuty(value.to_string())
        }
    }

    /// Whether the staff member can take proctor slots.
    pub fn is_proctor(&self) -> bool {
        matches!(self, Self::Proctor)
    }

    /// Fixed-duty label, if any.
    pub fn duty_label(&self) -> Option<&str> {
        match self {
            Self::FixedDuty(label) => Some(label),
            _ => None,
        }
    }
}

/// A staff member on the availability sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique key.
    pub name: String,
    /// Department.
    pub department: String,
    /// Preferred session.
    pub preference: SessionPreference,
    /// Status per testing day. Days missing from the map are `Unavailable`.
    pub statuses: BTreeMap<NaiveDate, DayStatus>,
}

impl StaffMember {
    /// Creates a staff member with no day statuses.
    pub fn new(name: impl Into<String>, preference: SessionPreference) -> Self {
        Self {
            name: name.into(),
            department: String::new(),
            preference,
            statuses: BTreeMap::new(),
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the status for a day.
    pub fn with_status(mut self, day: NaiveDate, status: DayStatus) -> Self {
        self.statuses.insert(day, status);
        self
    }

    /// Marks the staff member as available to proctor on a day.
    pub fn proctoring_on(self, day: NaiveDate) -> Self {
        self.with_status(day, DayStatus::Proctor)
    }

    /// Status on a day.
    pub fn status_on(&self, day: NaiveDate) -> &DayStatus {
        self.statuses.get(&day).unwrap_or(&DayStatus::Unavailable)
    }

    /// Whether the staff member may proctor on a day.
    pub fn can_proctor_on(&self, day: NaiveDate) -> bool {
        self.status_on(day).is_proctor()
    }
}
