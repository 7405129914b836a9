//! StratPlan - guided strategic planning wizard
//!
//! CLI entry point for the interactive wizard and batch runs.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use stratplan::cli::{Cli, Command, generate_after_help, get_log_path};
use stratplan::config::Config;
use stratplan::controller::{Action, ControllerHandle, StepController, StepReport};
use stratplan::export::Exporter;
use stratplan::llm::create_client;
use stratplan::prompts::PromptLoader;
use stratplan::repl;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Help text reflects the default config chain; --config is not parsed yet
    let help_config = Config::load(None).unwrap_or_default();

    // Build command with dynamic after_help that shows key and log status
    let cmd = Cli::command().after_help(generate_after_help(&help_config));
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(model = %config.llm.model, "StratPlan loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Wizard) | None => {
            debug!("main: launching wizard");
            repl::run_interactive(&config).await
        }
        Some(Command::Run {
            objective,
            metrics,
            timeline,
            category,
            output,
            outcome,
        }) => {
            debug!(%output, "main: matched Run command");
            let goals = [objective, metrics, timeline, category];
            cmd_run(&config, goals, &output, outcome).await
        }
        Some(Command::Logs { lines }) => {
            debug!(lines, "main: matched Logs command");
            cmd_logs(lines)
        }
    }
}

/// Print the tail of the log file
fn cmd_logs(lines: usize) -> Result<()> {
    debug!(lines, "cmd_logs: called");
    let log_path = get_log_path();

    if !log_path.exists() {
        debug!(?log_path, "cmd_logs: log file does not exist");
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    let file = fs::File::open(&log_path).context("Failed to open log file")?;
    let reader = BufReader::new(file);
    let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

    let start = all_lines.len().saturating_sub(lines);
    for line in &all_lines[start..] {
        println!("{}", line);
    }

    Ok(())
}

/// Run every step non-interactively (batch mode)
async fn cmd_run(config: &Config, goals: [String; 4], output: &str, outcome: Option<String>) -> Result<()> {
    debug!(%output, has_outcome = outcome.is_some(), "cmd_run: called");
    let token = config.llm.api_key_from_env().ok_or_else(|| {
        eyre::eyre!(
            "API key not found. Set the {} environment variable.",
            config.llm.api_key_env
        )
    })?;
    debug!("cmd_run: API key found");

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let workdir = std::env::current_dir()?;
    let controller = StepController::new(
        llm,
        PromptLoader::new(&workdir),
        Exporter::new(config.export.dir.clone()),
    );
    let handle = ControllerHandle::spawn(controller);

    let [objective, metrics, timeline, category] = goals;
    step(&handle, Action::validate_key(token)).await?;
    step(&handle, Action::submit_goals(objective, metrics, timeline, category)).await?;
    step(&handle, Action::GenerateOutcomes).await?;

    let selected = match outcome {
        Some(outcome) => outcome,
        None => handle.snapshot().await?.document.outcomes,
    };
    step(&handle, Action::generate_plan(selected.clone())).await?;
    step(&handle, Action::generate_rewards(selected)).await?;
    step(&handle, Action::GenerateReport).await?;
    let saved = step(&handle, Action::save_report(output)).await?;

    handle.shutdown().await?;

    match saved.artifact {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", saved.message),
    }
    Ok(())
}

/// Dispatch one batch step, echoing its status to stderr
async fn step(handle: &ControllerHandle, action: Action) -> Result<StepReport> {
    let kind = action.kind();
    let report = handle
        .dispatch(action)
        .await
        .with_context(|| format!("Step {} failed", kind))?;
    eprintln!("{}: {}", kind, report.message);
    Ok(report)
}
