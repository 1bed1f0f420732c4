//! Exam proctor scheduling.
//!
//! Assigns staff to exam room-sessions: each room-session needs a computed
//! number of proctors, each staff member can cover at most one slot a day,
//! and difficulty-weighted workload is balanced across staff with a
//! deterministic greedy heuristic.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ExamRoomSession`, `ProctorSlot`,
//!   `StaffMember`, `Assignment`, `ProctorSchedule`
//! - **`demand`**: Room-sessions → proctor slots with difficulty scores
//! - **`availability`**: Staff × day registry, ranked candidate queries,
//!   run-scoped `StaffLoad`
//! - **`scheduler`**: Greedy load-balanced assigner, schedule compiler,
//!   workload KPIs, end-to-end `ProctorScheduler`
//! - **`validation`**: Pre-flight input checks
//! - **`io`**: CSV ingestion of the exam book and availability sheet,
//!   CSV report tables
//! - **`config`**, **`error`**, **`logging`**: Ambient concerns
//!
//! # Data Flow
//!
//! ```text
//! demand ──► scheduler::GreedyAssigner ◄── availability
//!                     │
//!                     ▼
//!          scheduler::compile_schedule
//! ```
//!
//! The core (demand, availability, scheduler) performs no I/O and keeps
//! no state between runs.

pub mod availability;
pub mod config;
pub mod demand;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{SchedulerConfig, SelectionStrategy};
pub use error::{ProctorError, Result};
pub use scheduler::{ProctorPlan, ProctorScheduler};
