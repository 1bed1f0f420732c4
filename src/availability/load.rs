//! Run-scoped staff workload state.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Cumulative difficulty and used days per staff member.
///
/// Created empty at the start of each assignment run and only grown by
/// that run: loads never decrease and used-day sets only gain days.
/// Outside the crate the state is read-only.
#[derive(Debug, Clone, Default)]
pub struct StaffLoad {
    load: HashMap<String, f64>,
    used_days: HashMap<String, BTreeSet<NaiveDate>>,
}

impl StaffLoad {
    /// Creates an empty load table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative difficulty of a staff member (0.0 if never assigned).
    pub fn load_of(&self, staff: &str) -> f64 {
        self.load.get(staff).copied().unwrap_or(0.0)
    }

    /// Number of distinct days the staff member has been assigned.
    pub fn days_used(&self, staff: &str) -> usize {
        self.used_days.get(staff).map_or(0, BTreeSet::len)
    }

    /// Whether the staff member already holds an assignment on `day`.
    pub fn is_used_on(&self, staff: &str, day: NaiveDate) -> bool {
        self.used_days
            .get(staff)
            .is_some_and(|days| days.contains(&day))
    }

    /// Days on which the staff member is assigned, ascending.
    pub fn used_days_of(&self, staff: &str) -> Vec<NaiveDate> {
        self.used_days
            .get(staff)
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Final loads keyed by staff name, in name order.
    pub fn totals(&self) -> BTreeMap<String, f64> {
        self.load.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Sum of all loads.
    pub fn total(&self) -> f64 {
        self.load.values().sum()
    }

    /// Number of staff members holding at least one assignment.
    pub fn staff_count(&self) -> usize {
        self.load.len()
    }

    /// Adds an assignment's difficulty and marks the day as used.
    pub(crate) fn record(&mut self, staff: &str, day: NaiveDate, difficulty: f64) {
        *self.load.entry(staff.to_string()).or_insert(0.0) += difficulty;
        self.used_days
            .entry(staff.to_string())
            .or_default()
            .insert(day);
    }
}
