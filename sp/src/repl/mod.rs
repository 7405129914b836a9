//! Interactive wizard for StratPlan
//!
//! Walks the planning steps in a line-oriented REPL with slash commands.

mod command;
mod session;

pub use command::{ReplCommand, WizardStep};
pub use session::ReplSession;

use eyre::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::controller::{ControllerHandle, StepController};
use crate::export::Exporter;
use crate::llm::create_client;
use crate::prompts::PromptLoader;

/// Run the interactive wizard
///
/// This is the main entry point for `sp` and `sp wizard`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    debug!("run_interactive: called");
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let workdir = std::env::current_dir()?;

    let controller = StepController::new(
        llm,
        PromptLoader::new(&workdir),
        Exporter::new(config.export.dir.clone()),
    );
    let handle = ControllerHandle::spawn(controller);

    let mut session = ReplSession::new(handle, config.llm.api_key_from_env(), config.llm.api_key_env.clone());
    session.run().await
}
