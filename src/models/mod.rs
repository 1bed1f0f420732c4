//! Proctor scheduling domain models.
//!
//! Provides the data types for representing a proctoring problem and its
//! solution.
//!
//! # Domain Mappings
//!
//! | proctor-schedule | Generic scheduling |
//! |------------------|--------------------|
//! | ExamRoomSession | Task |
//! | ProctorSlot | Activity |
//! | StaffMember | Resource (human) |
//! | Assignment | Activity → resource binding |
//! | ProctorSchedule | Schedule |

mod exam;
mod schedule;
mod slot;
mod staff;

pub use exam::{AccommodationFlags, ExamRoomSession, Session, Subject};
pub use schedule::{Assignment, ProctorSchedule, ScheduleEntry, PROCTOR_DUTY};
pub use slot::ProctorSlot;
pub use staff::{DayStatus, SessionPreference, StaffMember};
