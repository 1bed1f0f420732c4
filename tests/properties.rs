//! Seeded randomized checks over generated exam weeks.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use proctor_schedule::availability::AvailabilityRegistry;
use proctor_schedule::demand::{slot_count, DemandCalculator};
use proctor_schedule::io::{write_assignments, write_schedule};
use proctor_schedule::models::{DayStatus, ExamRoomSession, Session, SessionPreference, StaffMember};
use proctor_schedule::scheduler::{GreedyAssigner, LoadKpi};
use proctor_schedule::{logging, ProctorScheduler};

const TYPES: [&str; 8] = [
    "plain",
    "2x",
    "1.5x",
    "enl",
    "1.5x QR",
    "2x QR",
    "scribe",
    "1.5x enl",
];
const COURSES: [&str; 4] = ["EXRC", "HXRK", "MXRF", "SXRP"];

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16 + offset).unwrap()
}

/// Generates a feasible week: every day has at least as many proctors as
/// slots, and no PM room reaches the late slot cutoff.
fn generate(seed: u64) -> (Vec<ExamRoomSession>, AvailabilityRegistry) {
    let mut rng = StdRng::seed_from_u64(seed);
    let days = rng.random_range(1..=4);

    let mut rooms = Vec::new();
    for offset in 0..days {
        for r in 0..rng.random_range(1..=5) {
            let session = if rng.random_bool(0.5) { Session::Am } else { Session::Pm };
            let mut kind = TYPES[rng.random_range(0..TYPES.len())];
            if session == Session::Pm && kind.contains("scribe") {
                kind = "plain";
            }
            let active = if kind.contains("scribe") {
                rng.random_range(1..=2)
            } else {
                rng.random_range(1..=30)
            };
            rooms.push(
                ExamRoomSession::new(
                    COURSES[rng.random_range(0..COURSES.len())],
                    day(offset),
                    session,
                    format!("{}", 100 + r),
                )
                .with_type(kind)
                .with_active(active),
            );
        }
    }

    let mut demand: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for room in &rooms {
        *demand.entry(room.day).or_insert(0) += slot_count(room).unwrap() as usize;
    }
    let staff_count = demand.values().copied().max().unwrap_or(0) + rng.random_range(0..4);

    let mut staff = Vec::new();
    for i in 0..staff_count {
        let pref = if rng.random_bool(0.5) {
            SessionPreference::Early
        } else {
            SessionPreference::Late
        };
        let mut member = StaffMember::new(format!("Staff {i:02}"), pref);
        for offset in 0..days {
            let needed = demand.get(&day(offset)).copied().unwrap_or(0);
            let status = if i < needed || rng.random_bool(0.6) {
                DayStatus::Proctor
            } else if rng.random_bool(0.5) {
                DayStatus::FixedDuty("SUB PROCTOR".into())
            } else {
                DayStatus::Unavailable
            };
            member = member.with_status(day(offset), status);
        }
        staff.push(member);
    }

    (rooms, AvailabilityRegistry::from_staff(staff).unwrap())
}

#[test]
fn test_every_slot_filled_once_per_day() {
    logging::init_test();
    for seed in 0..200 {
        let (rooms, registry) = generate(seed);
        let slots = DemandCalculator::new().slots(&rooms).unwrap();
        let run = GreedyAssigner::new().assign(&slots, &registry).unwrap();

        assert_eq!(run.assignment_count(), slots.len(), "seed {seed}");

        let mut seen = HashSet::new();
        for a in &run.assignments {
            assert!(
                seen.insert((a.staff.clone(), a.day())),
                "seed {seed}: {} double-booked on {}",
                a.staff,
                a.day()
            );
            assert!(registry.get(&a.staff).unwrap().can_proctor_on(a.day()));
        }
    }
}

#[test]
fn test_loads_match_assignments() {
    for seed in 0..200 {
        let (rooms, registry) = generate(seed);
        let slots = DemandCalculator::new().slots(&rooms).unwrap();
        let run = GreedyAssigner::new().assign(&slots, &registry).unwrap();

        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for a in &run.assignments {
            *sums.entry(a.staff.clone()).or_insert(0.0) += a.difficulty;
        }
        for (name, sum) in &sums {
            assert!((run.total_for(name) - sum).abs() < 1e-10, "seed {seed}");
        }

        // Running totals climb by each row's difficulty and end at the final load
        let mut running: BTreeMap<&str, f64> = BTreeMap::new();
        for a in &run.assignments {
            let total = running.entry(a.staff.as_str()).or_insert(0.0);
            *total += a.difficulty;
            assert!((a.running_total - *total).abs() < 1e-10, "seed {seed}");
        }
        assert_eq!(run.loads.staff_count(), sums.len());
    }
}

#[test]
fn test_runs_are_deterministic() {
    for seed in 0..50 {
        let (rooms, registry) = generate(seed);
        let render = || {
            let plan = ProctorScheduler::new().run(&rooms, &registry).unwrap();
            let mut assignments = Vec::new();
            write_assignments(&mut assignments, &plan.run).unwrap();
            let mut schedule = Vec::new();
            write_schedule(&mut schedule, &plan.schedule).unwrap();
            (assignments, schedule)
        };
        assert_eq!(render(), render(), "seed {seed}");
    }
}

#[test]
fn test_uniform_difficulty_stays_balanced() {
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let days = rng.random_range(2..=5);
        let staff_count = rng.random_range(3..=10);

        let mut rooms = Vec::new();
        for offset in 0..days {
            // Plain AM rooms: two slots of difficulty 1.0 each
            for r in 0..rng.random_range(1..=staff_count / 2) {
                rooms.push(
                    ExamRoomSession::new("MXRF", day(offset), Session::Am, format!("{r}"))
                        .with_type("plain")
                        .with_active(20),
                );
            }
        }
        let registry = AvailabilityRegistry::from_staff(
            (0..staff_count)
                .map(|i| {
                    (0..days).fold(
                        StaffMember::new(format!("S{i}"), SessionPreference::Early),
                        |m, offset| m.proctoring_on(day(offset)),
                    )
                })
                .collect(),
        )
        .unwrap();

        let plan = ProctorScheduler::new().run(&rooms, &registry).unwrap();
        let kpi = LoadKpi::calculate(&plan.run);
        assert!(kpi.within_fairness_bound(), "seed {seed}: spread {}", kpi.spread);
    }
}
