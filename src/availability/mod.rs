//! Staff availability registry and candidate ranking.
//!
//! Wraps the staff × day status sheet and answers ranked candidate queries
//! for a (day, session, slot index) against the current run's load table.
//!
//! # Ranking
//!
//! 1. Keep staff whose status on the day is `Proctor`.
//! 2. Split into same-preference and opposite-preference pools.
//! 3. Sort each pool by (cumulative load, days used), stable in roster order.
//! 4. PM slots at or past the late-slot cutoff only draw from the
//!    same-preference pool; otherwise the opposite pool follows it.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use proctor_schedule::availability::{AvailabilityRegistry, StaffLoad};
//! use proctor_schedule::models::{Session, SessionPreference, StaffMember};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
//! let registry = AvailabilityRegistry::from_staff(vec![
//!     StaffMember::new("Ada", SessionPreference::Early).proctoring_on(day),
//!     StaffMember::new("Bo", SessionPreference::Late).proctoring_on(day),
//! ])
//! .unwrap();
//!
//! let load = StaffLoad::new();
//! assert_eq!(registry.candidates(day, Session::Pm, 1, &load), vec!["Bo", "Ada"]);
//! assert_eq!(registry.candidates(day, Session::Pm, 4, &load), vec!["Bo"]);
//! ```

mod load;
mod ranking;

pub use load::StaffLoad;
pub use ranking::{rank_pool, RankKey};

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use crate::error::{ProctorError, Result};
use crate::models::{Session, StaffMember};

/// Default first PM slot index restricted to same-preference staff.
pub const DEFAULT_LATE_SLOT_CUTOFF: u32 = 4;

/// The staff × day availability sheet.
#[derive(Debug, Clone)]
pub struct AvailabilityRegistry {
    staff: Vec<StaffMember>,
    index: HashMap<String, usize>,
    days: BTreeSet<NaiveDate>,
    late_slot_cutoff: u32,
}

impl AvailabilityRegistry {
    /// Creates a registry over the given day columns and staff roster.
    ///
    /// Days that only appear in a staff member's statuses are added to the
    /// day set. Roster order is kept and breaks ranking ties.
    ///
    /// # Errors
    /// `Configuration` on an empty or duplicate staff name.
    pub fn new(
        days: impl IntoIterator<Item = NaiveDate>,
        staff: Vec<StaffMember>,
    ) -> Result<Self> {
        let mut day_set: BTreeSet<NaiveDate> = days.into_iter().collect();
        let mut index = HashMap::with_capacity(staff.len());

        for (i, member) in staff.iter().enumerate() {
            if member.name.trim().is_empty() {
                return Err(ProctorError::configuration(i + 1, "staff name is empty"));
            }
            if index.insert(member.name.clone(), i).is_some() {
                return Err(ProctorError::configuration(
                    i + 1,
                    format!("duplicate staff name: {}", member.name),
                ));
            }
            day_set.extend(member.statuses.keys().copied());
        }

        Ok(Self {
            staff,
            index,
            days: day_set,
            late_slot_cutoff: DEFAULT_LATE_SLOT_CUTOFF,
        })
    }

    /// Creates a registry whose days are those named in staff statuses.
    pub fn from_staff(staff: Vec<StaffMember>) -> Result<Self> {
        Self::new(std::iter::empty(), staff)
    }

    /// Sets the first PM slot index restricted to same-preference staff.
    pub fn with_late_slot_cutoff(mut self, cutoff: u32) -> Self {
        self.late_slot_cutoff = cutoff;
        self
    }

    /// Staff roster in input order.
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Looks up a staff member by name.
    pub fn get(&self, name: &str) -> Option<&StaffMember> {
        self.index.get(name).map(|&i| &self.staff[i])
    }

    /// Whether the registry has a column for `day`.
    pub fn has_day(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Day columns, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Number of staff with `Proctor` status on `day`.
    pub fn proctor_count(&self, day: NaiveDate) -> usize {
        self.staff.iter().filter(|s| s.can_proctor_on(day)).count()
    }

    /// First PM slot index restricted to same-preference staff.
    pub fn late_slot_cutoff(&self) -> u32 {
        self.late_slot_cutoff
    }

    /// Ranked candidate staff keys for a slot.
    ///
    /// Staff already used on `day` are not removed here; the assigner
    /// filters them.
    pub fn candidates<'a>(
        &'a self,
        day: NaiveDate,
        session: Session,
        slot_index: u32,
        load: &StaffLoad,
    ) -> Vec<&'a str> {
        let mut same = Vec::new();
        let mut opposite = Vec::new();

        for member in self.staff.iter().filter(|s| s.can_proctor_on(day)) {
            if member.preference.matches(session) {
                same.push(member.name.as_str());
            } else {
                opposite.push(member.name.as_str());
            }
        }

        rank_pool(&mut same, load);

        if session == Session::Pm && slot_index >= self.late_slot_cutoff {
            return same;
        }

        rank_pool(&mut opposite, load);
        same.extend(opposite);
        same
    }

    /// Fixed-duty cells as (day, staff, label), by staff then day.
    pub fn duty_cells(&self) -> impl Iterator<Item = (NaiveDate, &StaffMember, &str)> + '_ {
        self.staff.iter().flat_map(|member| {
            member
                .statuses
                .iter()
                .filter_map(move |(day, status)| status.duty_label().map(|l| (*day, member, l)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayStatus, SessionPreference};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn early(name: &str) -> StaffMember {
        StaffMember::new(name, SessionPreference::Early).proctoring_on(d(17))
    }

    fn late(name: &str) -> StaffMember {
        StaffMember::new(name, SessionPreference::Late).proctoring_on(d(17))
    }

    fn registry() -> AvailabilityRegistry {
        AvailabilityRegistry::from_staff(vec![
            early("E1"),
            late("L1"),
            early("E2"),
            late("L2"),
            StaffMember::new("Away", SessionPreference::Early)
                .with_status(d(17), DayStatus::Unavailable),
            StaffMember::new("Sub", SessionPreference::Late)
                .with_status(d(17), DayStatus::FixedDuty("SUB PROCTOR".into())),
        ])
        .unwrap()
    }

    #[test]
    fn test_same_pool_first() {
        let r = registry();
        let load = StaffLoad::new();
        assert_eq!(r.candidates(d(17), Session::Am, 1, &load), vec!["E1", "E2", "L1", "L2"]);
        assert_eq!(r.candidates(d(17), Session::Pm, 3, &load), vec!["L1", "L2", "E1", "E2"]);
    }

    #[test]
    fn test_pools_sorted_by_load() {
        let r = registry();
        let mut load = StaffLoad::new();
        load.record("E1", d(16), 1.5);
        load.record("L1", d(16), 0.5);

        // Each pool sorted independently; no interleaving across pools
        assert_eq!(r.candidates(d(17), Session::Am, 1, &load), vec!["E2", "E1", "L2", "L1"]);
    }

    #[test]
    fn test_late_pm_slots_drop_opposite_pool() {
        let r = registry();
        let load = StaffLoad::new();
        assert_eq!(r.candidates(d(17), Session::Pm, 4, &load), vec!["L1", "L2"]);
        assert_eq!(r.candidates(d(17), Session::Pm, 7, &load), vec!["L1", "L2"]);
        // AM slots are never restricted
        assert_eq!(r.candidates(d(17), Session::Am, 7, &load).len(), 4);
    }

    #[test]
    fn test_custom_cutoff() {
        let r = registry().with_late_slot_cutoff(2);
        let load = StaffLoad::new();
        assert_eq!(r.candidates(d(17), Session::Pm, 1, &load).len(), 4);
        assert_eq!(r.candidates(d(17), Session::Pm, 2, &load), vec!["L1", "L2"]);
    }

    #[test]
    fn test_unknown_day_has_no_candidates() {
        let r = registry();
        assert!(r.candidates(d(20), Session::Am, 1, &StaffLoad::new()).is_empty());
        assert!(!r.has_day(d(20)));
        assert!(r.has_day(d(17)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = AvailabilityRegistry::from_staff(vec![early("E1"), early("E1")]).unwrap_err();
        assert!(matches!(err, ProctorError::Configuration { row: 2, .. }));
    }

    #[test]
    fn test_duty_cells_and_counts() {
        let r = registry();
        let cells: Vec<(NaiveDate, &str, &str)> = r
            .duty_cells()
            .map(|(day, s, label)| (day, s.name.as_str(), label))
            .collect();
        assert_eq!(cells, vec![(d(17), "Sub", "SUB PROCTOR")]);
        assert_eq!(r.proctor_count(d(17)), 4);
        assert_eq!(r.get("L2").map(|s| s.preference), Some(SessionPreference::Late));
        assert!(r.get("Nobody").is_none());
    }

    #[test]
    fn test_declared_days_kept() {
        let r = AvailabilityRegistry::new([d(19)], vec![early("E1")]).unwrap();
        assert_eq!(r.days().collect::<Vec<_>>(), vec![d(17), d(19)]);
        assert_eq!(r.proctor_count(d(19)), 0);
    }
}
