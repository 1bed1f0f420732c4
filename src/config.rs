//! Scheduler configuration.
//!
//! All fields have defaults matching historical behavior, so an empty JSON
//! object is a valid config file:
//!
//! ```json
//! {
//!   "selection": { "kind": "stepped_threshold", "step": 0.25 },
//!   "late_slot_cutoff": 4,
//!   "holding_sections": [89]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::availability::DEFAULT_LATE_SLOT_CUTOFF;
use crate::error::{ProctorError, Result};

/// Default reserved section for students held out of lab-eligible sittings.
pub const DEFAULT_HOLDING_SECTION: u32 = 89;

/// Default load band width for [`SelectionStrategy::SteppedThreshold`].
pub const DEFAULT_THRESHOLD_STEP: f64 = 0.25;

/// How the assigner picks one staff member from a ranked candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Minimum current load; ties go to the earlier candidate.
    Argmin,
    /// Raise a load threshold by `step` from zero until some candidate's
    /// load is strictly below it; take the first such candidate.
    ///
    /// Candidates inside the same band are treated as equal, so this can
    /// pick a slightly heavier same-preference candidate over a lighter
    /// opposite-preference one.
    SteppedThreshold {
        /// Band width.
        #[serde(default = "default_step")]
        step: f64,
    },
}

fn default_step() -> f64 {
    DEFAULT_THRESHOLD_STEP
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        Self::Argmin
    }
}

/// Configuration for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Candidate selection rule.
    pub selection: SelectionStrategy,
    /// First PM slot index restricted to same-preference staff.
    pub late_slot_cutoff: u32,
    /// Exam-book sections dropped by the activity filter.
    pub holding_sections: Vec<u32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            selection: SelectionStrategy::Argmin,
            late_slot_cutoff: DEFAULT_LATE_SLOT_CUTOFF,
            holding_sections: vec![DEFAULT_HOLDING_SECTION],
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the late-slot cutoff.
    pub fn with_late_slot_cutoff(mut self, cutoff: u32) -> Self {
        self.late_slot_cutoff = cutoff;
        self
    }

    /// Sets the holding sections.
    pub fn with_holding_sections(mut self, sections: Vec<u32>) -> Self {
        self.holding_sections = sections;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if let SelectionStrategy::SteppedThreshold { step } = self.selection {
            if !step.is_finite() || step <= 0.0 {
                return Err(ProctorError::configuration(
                    0,
                    format!("threshold step must be positive and finite, got {step}"),
                ));
            }
        }
        if self.late_slot_cutoff == 0 {
            return Err(ProctorError::configuration(
                0,
                "late_slot_cutoff must be at least 1",
            ));
        }
        Ok(())
    }
}
