//! Assignment and schedule report tables.

use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::models::ProctorSchedule;
use crate::scheduler::AssignmentRun;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct AssignmentRow<'a> {
    #[serde(rename = "Course")]
    course: &'a str,
    #[serde(rename = "Time")]
    time: &'static str,
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Room")]
    room: &'a str,
    #[serde(rename = "proctor#")]
    slot_index: u32,
    #[serde(rename = "Proctor")]
    proctor: &'a str,
    assignment_difficulty: f64,
    total_assignment_difficulty: f64,
}

#[derive(Serialize)]
struct ScheduleRow<'a> {
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Time")]
    time: &'static str,
    #[serde(rename = "Proctor")]
    proctor: &'a str,
    #[serde(rename = "Assignment")]
    assignment: &'a str,
}

/// Writes the ProctorAssignments table.
///
/// `total_assignment_difficulty` is the staff member's running total when
/// the row's assignment was made. On each staff member's last row it
/// equals the final load.
pub fn write_assignments<W: Write>(writer: W, run: &AssignmentRun) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for a in &run.assignments {
        wtr.serialize(AssignmentRow {
            course: a.slot.course_code(),
            time: a.session().as_str(),
            day: a.day().format(DATE_FORMAT).to_string(),
            room: a.slot.room(),
            slot_index: a.slot.slot_index,
            proctor: &a.staff,
            assignment_difficulty: a.difficulty,
            total_assignment_difficulty: a.running_total,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the ProctorSchedule table. Day-level duties have an empty `Time`.
pub fn write_schedule<W: Write>(writer: W, schedule: &ProctorSchedule) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for e in &schedule.entries {
        wtr.serialize(ScheduleRow {
            day: e.day.format(DATE_FORMAT).to_string(),
            time: e.session.map_or("", |s| s.as_str()),
            proctor: &e.staff,
            assignment: &e.duty,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
