//! End-to-end scheduling run.
//!
//! Demand calculation, assignment and schedule compilation behind one
//! call, configured by a [`SchedulerConfig`].

use std::borrow::Cow;
use tracing::info;

use super::{compile_schedule, AssignmentRun, GreedyAssigner};
use crate::availability::AvailabilityRegistry;
use crate::config::SchedulerConfig;
use crate::demand::DemandCalculator;
use crate::error::Result;
use crate::models::{ExamRoomSession, ProctorSchedule};

/// Result of a full scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ProctorPlan {
    /// Assignments and final loads.
    pub run: AssignmentRun,
    /// Unified duty schedule.
    pub schedule: ProctorSchedule,
}

/// Runs the full proctor scheduling pipeline.
///
/// Holds no state between runs; each call to [`ProctorScheduler::run`]
/// starts with an empty load table.
#[derive(Debug, Clone, Default)]
pub struct ProctorScheduler {
    config: SchedulerConfig,
}

impl ProctorScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules proctors for pre-filtered, active room-sessions.
    ///
    /// # Errors
    /// Any [`crate::error::ProctorError`] from config validation, demand
    /// calculation, assignment or compilation. No partial plan is returned.
    pub fn run(
        &self,
        sessions: &[ExamRoomSession],
        registry: &AvailabilityRegistry,
    ) -> Result<ProctorPlan> {
        self.config.validate()?;

        let cutoff = self.config.late_slot_cutoff;
        let registry: Cow<'_, AvailabilityRegistry> = if registry.late_slot_cutoff() == cutoff {
            Cow::Borrowed(registry)
        } else {
            Cow::Owned(registry.clone().with_late_slot_cutoff(cutoff))
        };

        let slots = DemandCalculator::new()
            .with_holding_sections(self.config.holding_sections.clone())
            .slots(sessions)?;
        info!(
            sessions = sessions.len(),
            slots = slots.len(),
            staff = registry.staff().len(),
            "proctor demand computed"
        );

        let run = GreedyAssigner::new()
            .with_selection(self.config.selection)
            .assign(&slots, &registry)?;
        let schedule = compile_schedule(&run.assignments, &registry)?;

        Ok(ProctorPlan { run, schedule })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayStatus, Session, SessionPreference, StaffMember};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_full_run() {
        let rooms = vec![
            ExamRoomSession::new("EXRC", d(17), Session::Am, "101")
                .with_type("plain")
                .with_active(25),
            ExamRoomSession::new("HXRK", d(17), Session::Pm, "102")
                .with_type("1.5x QR")
                .with_active(4),
        ];
        let registry = AvailabilityRegistry::from_staff(vec![
            StaffMember::new("Ada", SessionPreference::Early).proctoring_on(d(17)),
            StaffMember::new("Bo", SessionPreference::Early).proctoring_on(d(17)),
            StaffMember::new("Cy", SessionPreference::Late).proctoring_on(d(17)),
            StaffMember::new("Di", SessionPreference::Late).proctoring_on(d(17)),
            StaffMember::new("Ed", SessionPreference::Late).proctoring_on(d(17)),
            StaffMember::new("Fa", SessionPreference::Late)
                .with_status(d(17), DayStatus::FixedDuty("SUB PROCTOR".into())),
        ])
        .unwrap();

        let plan = ProctorScheduler::new().run(&rooms, &registry).unwrap();
        assert_eq!(plan.run.assignment_count(), 5);
        // PM QR room is processed first and filled by Late staff
        let pm: Vec<&str> = plan
            .run
            .assignments
            .iter()
            .filter(|a| a.session() == Session::Pm)
            .map(|a| a.staff.as_str())
            .collect();
        assert_eq!(pm, vec!["Cy", "Di", "Ed"]);
        assert_eq!(plan.schedule.entry_count(), 6);
        assert_eq!(plan.schedule.proctor_count(), 5);
    }

    #[test]
    fn test_config_cutoff_applies() {
        let rooms = vec![ExamRoomSession::new("MXRF", d(17), Session::Pm, "1")
            .with_type("QR")
            .with_active(3)];
        let registry = AvailabilityRegistry::from_staff(vec![
            StaffMember::new("Early1", SessionPreference::Early).proctoring_on(d(17)),
            StaffMember::new("Early2", SessionPreference::Early).proctoring_on(d(17)),
            StaffMember::new("Late1", SessionPreference::Late).proctoring_on(d(17)),
        ])
        .unwrap();

        assert!(ProctorScheduler::new().run(&rooms, &registry).is_ok());

        // Cutoff 2 keeps slots 2 and 3 inside the Late pool, which has one member
        let strict = SchedulerConfig::new().with_late_slot_cutoff(2);
        let err = ProctorScheduler::with_config(strict)
            .run(&rooms, &registry)
            .unwrap_err();
        assert!(err.is_infeasible());
    }
}
