//! Schedule compilation.
//!
//! Merges proctor assignments with the fixed duties on the availability
//! sheet into one per-staff duty table.

use tracing::{debug, warn};

use crate::availability::AvailabilityRegistry;
use crate::error::{ProctorError, Result};
use crate::models::{Assignment, ProctorSchedule, ScheduleEntry, Session, PROCTOR_DUTY};

/// Marker of duties that span the whole day rather than one session.
const DAY_LEVEL_MARKER: &str = "SCORING";

/// Session of a fixed duty, or `None` for a day-level duty.
///
/// Scoring duties (label contains `SCORING`, any case) cover the whole
/// day. Anything else, such as `SUB PROCTOR`, is tied to the session the
/// staff member prefers.
pub fn duty_session(label: &str, preferred: Session) -> Option<Session> {
    if label.to_uppercase().contains(DAY_LEVEL_MARKER) {
        None
    } else {
        Some(preferred)
    }
}

/// Builds the unified schedule.
///
/// Rows are unique per (day, session, staff, duty) and sorted by day,
/// then session (AM, PM, day-level), then staff and duty.
///
/// # Errors
/// `DataDependency` when an assignment names a staff member the registry
/// does not know, or a day on which that staff member is not a proctor.
pub fn compile_schedule(
    assignments: &[Assignment],
    registry: &AvailabilityRegistry,
) -> Result<ProctorSchedule> {
    let mut rows = Vec::with_capacity(assignments.len());

    for a in assignments {
        let day = a.day();
        let Some(member) = registry.get(&a.staff) else {
            warn!(staff = %a.staff, %day, "assignment for unknown staff member");
            return Err(ProctorError::data_dependency(
                day,
                &a.staff,
                "staff member missing from availability",
            ));
        };
        if !member.can_proctor_on(day) {
            warn!(staff = %a.staff, %day, "assignment on a non-proctor day");
            return Err(ProctorError::data_dependency(
                day,
                &a.staff,
                "staff member is not available to proctor that day",
            ));
        }
        rows.push(ScheduleEntry::new(day, Some(a.session()), &a.staff, PROCTOR_DUTY));
    }

    let mut duties = 0usize;
    for (day, member, label) in registry.duty_cells() {
        let session = duty_session(label, member.preference.session());
        rows.push(ScheduleEntry::new(day, session, &member.name, label));
        duties += 1;
    }

    rows.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then_with(|| session_rank(a.session).cmp(&session_rank(b.session)))
            .then_with(|| a.staff.cmp(&b.staff))
            .then_with(|| a.duty.cmp(&b.duty))
    });
    rows.dedup();

    debug!(
        proctor_rows = assignments.len(),
        duty_rows = duties,
        total = rows.len(),
        "schedule compiled"
    );

    Ok(ProctorSchedule { entries: rows })
}

fn session_rank(session: Option<Session>) -> u8 {
    match session {
        Some(Session::Am) => 0,
        Some(Session::Pm) => 1,
        None => 2,
    }
}
