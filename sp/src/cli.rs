//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;

/// StratPlan - guided strategic planning wizard
#[derive(Parser)]
#[command(
    name = "stratplan",
    about = "Guided strategic planning: goals, outcomes, plan, rewards, report",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk through the planning steps interactively (default)
    Wizard,

    /// Run every step non-interactively and save the report
    Run {
        /// Main goal
        #[arg(long)]
        objective: String,

        /// Key performance indicators
        #[arg(long)]
        metrics: String,

        /// Timeline for the goal
        #[arg(long)]
        timeline: String,

        /// Goal category (e.g. Financial, Operational, Marketing, Other)
        #[arg(long)]
        category: String,

        /// Report name; written as NAME.txt in the export directory
        #[arg(short, long, value_name = "NAME")]
        output: String,

        /// Outcome to plan against; defaults to the generated outcomes
        #[arg(long)]
        outcome: Option<String>,
    },

    /// Show wizard logs
    Logs {
        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stratplan")
        .join("logs")
        .join("stratplan.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with key and log file status
pub fn generate_after_help(config: &Config) -> String {
    debug!("generate_after_help: called");
    let env_name = &config.llm.api_key_env;
    let key_present = config.llm.api_key_from_env().is_some();

    let mut help = String::new();

    help.push_str("API Key:\n");
    let icon = if key_present {
        debug!(%env_name, "generate_after_help: key variable set");
        "\u{2705}"
    } else {
        debug!(%env_name, "generate_after_help: key variable not set");
        "\u{274C}"
    };
    let state = if key_present { "set" } else { "not set" };
    help.push_str(&format!("  {} {} {}\n", icon, env_name, state));

    help.push('\n');
    help.push_str(&format!("Model: {}\n", config.llm.model));
    help.push_str(&format!("Reports are saved to: {}\n", config.export.dir.display()));
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));

    debug!("generate_after_help: returning help text");
    help
}
