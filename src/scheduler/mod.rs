//! Greedy proctor assignment, schedule compilation and workload KPIs.
//!
//! # Algorithm
//!
//! `GreedyAssigner` walks days by descending demand and fills each slot
//! with the least-loaded eligible staff member. It is not optimal, but it
//! is deterministic, and with uniform availability the load spread stays
//! within one assignment.
//!
//! # KPI
//!
//! `LoadKpi` summarizes the resulting workload: totals, spread and
//! per-day counts.

mod compiler;
mod greedy;
mod kpi;
mod pipeline;

pub use compiler::{compile_schedule, duty_session};
pub use greedy::{day_order, select_candidate, slot_order, AssignmentRun, GreedyAssigner};
pub use kpi::LoadKpi;
pub use pipeline::{ProctorPlan, ProctorScheduler};
