//! Step controller
//!
//! Dispatches wizard actions against the wizard state, the LLM client and the
//! exporter, enforcing step order and reporting per-section status. The
//! controller runs as an actor so actions are applied one at a time.

mod action;
mod busy;
mod core;
mod handle;
mod status;

pub use action::{Action, ActionKind};
pub use busy::{BusyFlag, BusyGuard};
pub use self::core::{StepController, StepReport, WizardSnapshot};
pub use handle::{ControllerCommand, ControllerHandle};
pub use status::{Section, StepStatus};

use thiserror::Error;

use crate::export::ExportError;
use crate::llm::AuthError;
use crate::wizard::{Stage, ValidationError};

/// Why a wizard action did not complete
///
/// Failed completions are not errors: they store a placeholder and succeed
/// with `StepReport::degraded` set.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Cannot {action} yet: requires {required} (currently {current})")]
    PreconditionNotMet {
        action: ActionKind,
        required: Stage,
        current: Stage,
    },

    #[error("Prompt template error: {0}")]
    Prompt(String),

    #[error("Controller channel closed")]
    ChannelClosed,
}

impl StepError {
    /// Missing-field validation, wherever it was raised
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            StepError::Validation(e) => Some(*e),
            StepError::Export(ExportError::Validation(e)) => Some(*e),
            _ => None,
        }
    }
}
