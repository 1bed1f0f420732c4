//! Workload metrics (KPIs) for an assignment run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total difficulty | Sum of all assignment difficulties |
//! | Max / Min / Mean load | Over staff holding at least one assignment |
//! | Spread | Max load − min load |
//! | Largest difficulty | Heaviest single assignment |
//! | Assignments per day | Slot count by testing day |

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::AssignmentRun;

/// Workload balance indicators.
#[derive(Debug, Clone)]
pub struct LoadKpi {
    /// Sum of all assignment difficulties.
    pub total_difficulty: f64,
    /// Final load per staff member.
    pub load_by_staff: BTreeMap<String, f64>,
    /// Heaviest staff load.
    pub max_load: f64,
    /// Lightest load among assigned staff.
    pub min_load: f64,
    /// Mean load among assigned staff.
    pub mean_load: f64,
    /// `max_load - min_load`.
    pub spread: f64,
    /// Heaviest single assignment.
    pub largest_difficulty: f64,
    /// Assignment count by day.
    pub assignments_per_day: BTreeMap<NaiveDate, usize>,
}

impl LoadKpi {
    /// Computes KPIs from a completed run.
    pub fn calculate(run: &AssignmentRun) -> Self {
        let load_by_staff = run.loads.totals();
        let total_difficulty: f64 = run.assignments.iter().map(|a| a.difficulty).sum();

        let mut assignments_per_day = BTreeMap::new();
        for a in &run.assignments {
            *assignments_per_day.entry(a.day()).or_insert(0) += 1;
        }

        let largest_difficulty = run
            .assignments
            .iter()
            .map(|a| a.difficulty)
            .fold(0.0, f64::max);

        let (max_load, min_load, mean_load) = if load_by_staff.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let max = load_by_staff.values().copied().fold(f64::MIN, f64::max);
            let min = load_by_staff.values().copied().fold(f64::MAX, f64::min);
            let sum: f64 = load_by_staff.values().sum();
            (max, min, sum / load_by_staff.len() as f64)
        };

        Self {
            total_difficulty,
            load_by_staff,
            max_load,
            min_load,
            mean_load,
            spread: max_load - min_load,
            largest_difficulty,
            assignments_per_day,
        }
    }

    /// Whether the load spread stays within one heaviest assignment.
    pub fn within_fairness_bound(&self) -> bool {
        self.spread <= self.largest_difficulty + 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityRegistry;
    use crate::demand::DemandCalculator;
    use crate::models::{ExamRoomSession, Session, SessionPreference, StaffMember};
    use crate::scheduler::GreedyAssigner;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_empty_run() {
        let kpi = LoadKpi::calculate(&AssignmentRun::default());
        assert!((kpi.total_difficulty - 0.0).abs() < 1e-10);
        assert!((kpi.spread - 0.0).abs() < 1e-10);
        assert!(kpi.assignments_per_day.is_empty());
        assert!(kpi.within_fairness_bound());
    }

    #[test]
    fn test_kpi_from_run() {
        // Day 17: 2x AM room (3 × 2.0); day 18: plain AM room (2 × 1.0)
        let rooms = vec![
            ExamRoomSession::new("MXRF", d(17), Session::Am, "101")
                .with_type("2x")
                .with_active(8),
            ExamRoomSession::new("MXRF", d(18), Session::Am, "101")
                .with_type("plain")
                .with_active(8),
        ];
        let slots = DemandCalculator::new().slots(&rooms).unwrap();
        let registry = AvailabilityRegistry::from_staff(
            ["A", "B", "C"]
                .iter()
                .map(|n| {
                    StaffMember::new(*n, SessionPreference::Early)
                        .proctoring_on(d(17))
                        .proctoring_on(d(18))
                })
                .collect(),
        )
        .unwrap();
        let run = GreedyAssigner::new().assign(&slots, &registry).unwrap();
        let kpi = LoadKpi::calculate(&run);

        // Day 17 first: A, B, C each 2.0; day 18: A, B get 1.0
        assert!((kpi.total_difficulty - 8.0).abs() < 1e-10);
        assert!((kpi.max_load - 3.0).abs() < 1e-10);
        assert!((kpi.min_load - 2.0).abs() < 1e-10);
        assert!((kpi.spread - 1.0).abs() < 1e-10);
        assert!((kpi.largest_difficulty - 2.0).abs() < 1e-10);
        assert_eq!(kpi.assignments_per_day[&d(17)], 3);
        assert_eq!(kpi.assignments_per_day[&d(18)], 2);
        assert!(kpi.within_fairness_bound());
    }
}
