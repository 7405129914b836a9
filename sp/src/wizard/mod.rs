//! Wizard data model
//!
//! The goal specification, the plan document built from it, and the state
//! that tracks which wizard steps have completed.

mod document;
mod goals;
mod state;

pub use document::{PlanDocument, REPORT_TITLE};
pub use goals::{GoalSpec, SUGGESTED_CATEGORIES};
pub use state::{HistoryEntry, HistoryKind, Stage, WizardState};

use thiserror::Error;

/// A user-supplied form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Objective,
    Metrics,
    Timeline,
    Category,
    SelectedOutcome,
    Feedback,
    Report,
    Filename,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Objective => "objective",
            Field::Metrics => "metrics",
            Field::Timeline => "timeline",
            Field::Category => "category",
            Field::SelectedOutcome => "selected outcome",
            Field::Feedback => "feedback",
            Field::Report => "report",
            Field::Filename => "filename",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Missing or empty user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API Key is required!")]
    EmptyCredential,

    #[error("Please fill in all fields! Missing: {0}")]
    MissingField(Field),
}
