//! Greedy load-balanced proctor assigner.
//!
//! # Algorithm
//!
//! 1. Order days by descending slot demand (ties: earlier date first).
//! 2. Within a day, order slots PM before AM, then by slot index
//!    ascending, then by difficulty descending.
//! 3. For each slot, take the registry's ranked candidates, drop staff
//!    already used that day, and select by the configured strategy.
//! 4. Record the assignment; the slot's difficulty is added to the staff
//!    member's load and the day is marked used.
//!
//! A slot with no remaining candidate fails the whole run.
//!
//! # Complexity
//! O(n · s log s) where n = slots, s = staff.

use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::availability::{AvailabilityRegistry, StaffLoad};
use crate::config::SelectionStrategy;
use crate::error::{ProctorError, Result};
use crate::models::{Assignment, ProctorSlot};

/// Output of one assignment run.
#[derive(Debug, Clone, Default)]
pub struct AssignmentRun {
    /// One assignment per slot, in processing order.
    pub assignments: Vec<Assignment>,
    /// Final loads and used days.
    pub loads: StaffLoad,
}

impl AssignmentRun {
    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Returns all assignments held by a staff member.
    pub fn assignments_for_staff(&self, staff: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.staff == staff).collect()
    }

    /// Returns all assignments on a day.
    pub fn assignments_on(&self, day: NaiveDate) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.day() == day).collect()
    }

    /// Final cumulative load of a staff member.
    pub fn total_for(&self, staff: &str) -> f64 {
        self.loads.load_of(staff)
    }
}

/// Greedy, min-load proctor assigner.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use proctor_schedule::availability::AvailabilityRegistry;
/// use proctor_schedule::demand::DemandCalculator;
/// use proctor_schedule::models::{ExamRoomSession, Session, SessionPreference, StaffMember};
/// use proctor_schedule::scheduler::GreedyAssigner;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
/// let rooms = vec![ExamRoomSession::new("MXRF", day, Session::Am, "101")
///     .with_type("plain")
///     .with_active(20)];
/// let slots = DemandCalculator::new().slots(&rooms).unwrap();
///
/// let registry = AvailabilityRegistry::from_staff(vec![
///     StaffMember::new("Ada", SessionPreference::Early).proctoring_on(day),
///     StaffMember::new("Bo", SessionPreference::Early).proctoring_on(day),
/// ])
/// .unwrap();
///
/// let run = GreedyAssigner::new().assign(&slots, &registry).unwrap();
/// assert_eq!(run.assignment_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyAssigner {
    selection: SelectionStrategy,
}

impl GreedyAssigner {
    /// Creates an assigner using argmin selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    /// Assigns one staff member to every slot.
    ///
    /// Load state starts empty on every call.
    ///
    /// # Errors
    /// - `DataDependency` if a slot's day has no column in the registry.
    /// - `SchedulingInfeasible` naming the first slot left without a
    ///   candidate.
    pub fn assign(
        &self,
        slots: &[ProctorSlot],
        registry: &AvailabilityRegistry,
    ) -> Result<AssignmentRun> {
        let mut loads = StaffLoad::new();
        let mut assignments = Vec::with_capacity(slots.len());

        let days = day_order(slots);
        info!(slots = slots.len(), days = days.len(), "assigning proctors");

        for day in days {
            if !registry.has_day(day) {
                warn!(%day, "exam day missing from availability");
                return Err(ProctorError::data_dependency(
                    day,
                    "",
                    "exam day has no availability column",
                ));
            }

            let order = slot_order(slots, day);
            debug!(%day, slots = order.len(), "scheduling day");

            for idx in order {
                let slot = &slots[idx];
                let candidates: Vec<&str> = registry
                    .candidates(day, slot.exam_session(), slot.slot_index, &loads)
                    .into_iter()
                    .filter(|name| !loads.is_used_on(name, day))
                    .collect();

                let Some(pick) = select_candidate(&candidates, &loads, self.selection) else {
                    warn!(
                        %day,
                        session = %slot.exam_session(),
                        room = slot.room(),
                        slot_index = slot.slot_index,
                        "no eligible proctor left"
                    );
                    return Err(ProctorError::SchedulingInfeasible {
                        day,
                        session: slot.exam_session(),
                        room: slot.room().to_string(),
                        course: slot.course_code().to_string(),
                        slot_index: slot.slot_index,
                    });
                };

                let staff = candidates[pick];
                loads.record(staff, day, slot.difficulty);
                let running_total = loads.load_of(staff);
                debug!(
                    %day,
                    session = %slot.exam_session(),
                    room = slot.room(),
                    slot_index = slot.slot_index,
                    staff,
                    load = running_total,
                    "assigned"
                );
                assignments
                    .push(Assignment::new(slot.clone(), staff).with_running_total(running_total));
            }
        }

        info!(
            assignments = assignments.len(),
            staff = loads.staff_count(),
            total_difficulty = loads.total(),
            "assignment complete"
        );

        Ok(AssignmentRun { assignments, loads })
    }
}

/// Distinct slot days by descending demand, ties by ascending date.
pub fn day_order(slots: &[ProctorSlot]) -> Vec<NaiveDate> {
    let mut demand: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for slot in slots {
        *demand.entry(slot.day()).or_insert(0) += 1;
    }

    // BTreeMap iterates by date, and the sort is stable
    let mut days: Vec<(NaiveDate, usize)> = demand.into_iter().collect();
    days.sort_by_key(|&(_, count)| Reverse(count));
    days.into_iter().map(|(day, _)| day).collect()
}

/// Indices of a day's slots in processing order.
///
/// PM before AM, slot index ascending, difficulty descending. Remaining
/// ties keep input order.
pub fn slot_order(slots: &[ProctorSlot], day: NaiveDate) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].day() == day)
        .collect();

    indices.sort_by(|&a, &b| {
        let (sa, sb) = (&slots[a], &slots[b]);
        sb.exam_session()
            .cmp(&sa.exam_session())
            .then_with(|| sa.slot_index.cmp(&sb.slot_index))
            .then_with(|| sb.difficulty.total_cmp(&sa.difficulty))
    });

    indices
}

/// Picks a candidate index from a ranked list.
///
/// Returns `None` only for an empty list.
pub fn select_candidate(
    candidates: &[&str],
    loads: &StaffLoad,
    strategy: SelectionStrategy,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    match strategy {
        SelectionStrategy::Argmin => Some(argmin(candidates, loads)),
        SelectionStrategy::SteppedThreshold { step } => {
            let lightest = argmin(candidates, loads);
            let min_load = loads.load_of(candidates[lightest]);

            // Lowest band k·step that some candidate is strictly below
            let threshold = ((min_load / step).floor() + 1.0) * step;
            if !threshold.is_finite() {
                return Some(lightest);
            }
            Some(
                candidates
                    .iter()
                    .position(|name| loads.load_of(name) < threshold)
                    .unwrap_or(lightest),
            )
        }
    }
}

/// Index of the lightest candidate; ties go to the earlier one.
fn argmin(candidates: &[&str], loads: &StaffLoad) -> usize {
    let mut best = 0;
    let mut best_load = f64::INFINITY;
    for (i, name) in candidates.iter().enumerate() {
        let load = loads.load_of(name);
        if load < best_load {
            best = i;
            best_load = load;
        }
    }
    best
}
