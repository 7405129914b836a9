//! StratPlan - guided strategic planning wizard
//!
//! StratPlan walks a user through a fixed sequence of planning steps: validate
//! an API key, state goals, generate outcomes, a plan and rewards with a
//! remote chat-completion service, then compile and save a plain-text report.
//!
//! # Modules
//!
//! - [`credential`] - API key holder with a redacting `Debug`
//! - [`llm`] - LlmClient trait, OpenAI implementation and a scripted stub
//! - [`wizard`] - Goals, plan document and wizard progress
//! - [`controller`] - Step state machine, run as a single-consumer actor
//! - [`export`] - Writes the compiled report to `<name>.txt`
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`repl`] - Interactive wizard

pub mod cli;
pub mod config;
pub mod controller;
pub mod credential;
pub mod export;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod wizard;

// Re-export commonly used types
pub use config::{Config, ExportConfig, LlmConfig};
pub use controller::{
    Action, ActionKind, BusyFlag, ControllerHandle, Section, StepController, StepError, StepReport, StepStatus,
    WizardSnapshot,
};
pub use credential::Credential;
pub use export::{ExportError, Exporter};
pub use llm::{AuthError, CompletionError, LlmClient, LlmError, OpenAIClient, StubLlmClient, create_client};
pub use prompts::{PromptContext, PromptKind, PromptLoader};
pub use wizard::{Field, GoalSpec, HistoryEntry, HistoryKind, PlanDocument, Stage, ValidationError, WizardState};
