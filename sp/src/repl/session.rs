//! REPL session management

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use super::command::{ReplCommand, WizardStep};
use crate::controller::{Action, ControllerHandle, Section, StepError, StepReport, WizardSnapshot};
use crate::wizard::SUGGESTED_CATEGORIES;

const INDICATOR_INTERVAL_MS: u64 = 500;

/// Interactive wizard session
pub struct ReplSession {
    handle: ControllerHandle,
    /// Key from the environment, offered when the key prompt is left empty
    env_key: Option<String>,
    env_key_name: String,
}

impl ReplSession {
    pub fn new(handle: ControllerHandle, env_key: Option<String>, env_key_name: impl Into<String>) -> Self {
        Self {
            handle,
            env_key,
            env_key_name: env_key_name.into(),
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("ReplSession::run: called");
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let snapshot = self.handle.snapshot().await?;
            let prompt = format!("{} {} ", format!("[{}]", snapshot.stage).dimmed(), ">".bright_green());

            match rl.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match ReplCommand::parse(input) {
                        ReplCommand::Quit => break,
                        ReplCommand::Help => self.print_help(&snapshot),
                        ReplCommand::Status => self.print_status(&snapshot),
                        ReplCommand::Review => print_review(&snapshot),
                        ReplCommand::History => print_history(&snapshot),
                        ReplCommand::Reset => {
                            let result = self.dispatch_with_indicator(Action::ResetForm).await;
                            self.print_result(result);
                        }
                        ReplCommand::Step(step) => {
                            if step.in_planning_section() && !snapshot.planning_visible {
                                println!(
                                    "{} Validate your API key first (type {})",
                                    "!".yellow(),
                                    WizardStep::Key.name().yellow()
                                );
                                continue;
                            }
                            self.run_step(&mut rl, step, &snapshot).await?;
                        }
                        ReplCommand::Unknown(word) => {
                            println!("{} Unknown command: {}", "?".yellow(), word);
                            println!("Type {} for available commands", "/help".yellow());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        self.handle.shutdown().await?;
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Strategic Planning Assistant".bright_cyan().bold());
        if self.env_key.is_some() {
            println!("API key found in {}", self.env_key_name.bright_white());
        }
        println!(
            "Start with {}, type {} for help, {} to quit",
            WizardStep::Key.name().yellow(),
            "/help".yellow(),
            "/quit".yellow()
        );
        println!();
    }

    fn print_help(&self, snapshot: &WizardSnapshot) {
        println!();
        println!("{}", "Steps:".bright_cyan());
        for step in WizardStep::ALL {
            if step.in_planning_section() && !snapshot.planning_visible {
                continue;
            }
            println!("  {:14} {}", step.name().yellow(), step.description());
        }
        if !snapshot.planning_visible {
            println!("  {}", "(planning steps appear once the API key is validated)".dimmed());
        }
        println!();
        println!("{}", "Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Show progress and status messages", "/status".yellow());
        println!("  {:14} Review the current plan", "/review".yellow());
        println!("  {:14} Show generation history", "/history".yellow());
        println!("  {:14} Clear the form and start over", "/reset".yellow());
        println!("  {:14} Exit the wizard", "/quit".yellow());
        println!();
    }

    fn print_status(&self, snapshot: &WizardSnapshot) {
        println!();
        println!("{} {}", "Stage:".bright_cyan(), snapshot.stage);
        println!(
            "{} {}",
            "API key:".bright_cyan(),
            match (snapshot.credential_set, snapshot.planning_visible) {
                (_, true) => "validated".green(),
                (true, false) => "not validated".yellow(),
                (false, false) => "not set".red(),
            }
        );
        if self.handle.is_busy() {
            println!("{}", "Working...".dimmed());
        }
        for section in Section::ALL {
            let text = snapshot.status.get(section);
            if !text.is_empty() {
                println!("  {:10} {}", section.label().bright_white(), text);
            }
        }
        println!();
    }

    /// Collect the step's fields and dispatch it
    async fn run_step(&self, rl: &mut DefaultEditor, step: WizardStep, snapshot: &WizardSnapshot) -> Result<()> {
        debug!(%step, "ReplSession::run_step: called");
        let Some(action) = self.read_action(rl, step, snapshot)? else {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        };

        let result = self.dispatch_with_indicator(action).await;
        let succeeded = result.is_ok();
        self.print_result(result);

        if succeeded && step.action_kind().is_completion() {
            let snapshot = self.handle.snapshot().await?;
            let text = match step {
                WizardStep::Outcomes => &snapshot.document.outcomes,
                WizardStep::Plan | WizardStep::Refine => &snapshot.document.plan,
                WizardStep::Rewards => &snapshot.document.rewards,
                _ => return Ok(()),
            };
            println!();
            println!("{}", text);
            println!();
        } else if succeeded && step == WizardStep::Report {
            let snapshot = self.handle.snapshot().await?;
            println!();
            println!("{}", snapshot.document.report);
            println!();
        }
        Ok(())
    }

    /// Dispatch `action`, printing a progress line while the controller is busy
    async fn dispatch_with_indicator(&self, action: Action) -> Result<StepReport, StepError> {
        debug!(kind = %action.kind(), "ReplSession::dispatch_with_indicator: called");
        let dispatch = self.handle.dispatch(action);
        tokio::pin!(dispatch);

        let mut ticker = tokio::time::interval(Duration::from_millis(INDICATOR_INTERVAL_MS));
        // First tick completes immediately
        ticker.tick().await;
        let mut shown = false;

        let result = loop {
            tokio::select! {
                result = &mut dispatch => break result,
                _ = ticker.tick() => {
                    if self.handle.is_busy() {
                        if shown {
                            print!("{}", ".".dimmed());
                        } else {
                            print!("{}", "Working".dimmed());
                            shown = true;
                        }
                        let _ = std::io::stdout().flush();
                    }
                }
            }
        };

        if shown {
            println!();
        }
        result
    }

    /// Prompt for the fields a step needs; `None` when the user cancels
    fn read_action(
        &self,
        rl: &mut DefaultEditor,
        step: WizardStep,
        snapshot: &WizardSnapshot,
    ) -> Result<Option<Action>> {
        let action = match step {
            WizardStep::Key => {
                let hint = match self.env_key {
                    Some(_) => format!("API Key [enter for ${}]: ", self.env_key_name),
                    None => "API Key: ".to_string(),
                };
                let Some(token) = read_field(rl, &hint, "")? else {
                    return Ok(None);
                };
                let token = match (&self.env_key, token.trim().is_empty()) {
                    (Some(env_key), true) => env_key.clone(),
                    _ => token,
                };
                Action::validate_key(token)
            }
            WizardStep::Goals => {
                let goals = &snapshot.document.goals;
                let Some(objective) = read_field(rl, "Main goal: ", &goals.objective)? else {
                    return Ok(None);
                };
                let Some(metrics) = read_field(rl, "Key performance indicators: ", &goals.metrics)? else {
                    return Ok(None);
                };
                let Some(timeline) = read_field(rl, "Timeline for your goal: ", &goals.timeline)? else {
                    return Ok(None);
                };
                println!("{} {}", "Suggested categories:".dimmed(), SUGGESTED_CATEGORIES.join(", ").dimmed());
                let Some(category) = read_field(rl, "Category: ", &goals.category)? else {
                    return Ok(None);
                };
                Action::submit_goals(objective, metrics, timeline, category)
            }
            WizardStep::Outcomes => Action::GenerateOutcomes,
            WizardStep::Plan | WizardStep::Rewards => {
                let document = &snapshot.document;
                let initial = if document.selected_outcome.is_empty() {
                    &document.outcomes
                } else {
                    &document.selected_outcome
                };
                let Some(selected) = read_field(rl, "Selected outcome: ", initial)? else {
                    return Ok(None);
                };
                if step == WizardStep::Plan {
                    Action::generate_plan(selected)
                } else {
                    Action::generate_rewards(selected)
                }
            }
            WizardStep::Refine => {
                let Some(feedback) = read_field(rl, "Feedback: ", "")? else {
                    return Ok(None);
                };
                Action::refine_plan(feedback)
            }
            WizardStep::Report => Action::GenerateReport,
            WizardStep::Save => {
                let Some(filename) = read_field(rl, "Save as (without .txt): ", "")? else {
                    return Ok(None);
                };
                Action::save_report(filename.trim())
            }
        };
        Ok(Some(action))
    }

    fn print_result(&self, result: Result<StepReport, StepError>) {
        match result {
            Ok(report) => {
                info!(kind = %report.kind, stage = %report.stage, "Step completed");
                if report.degraded {
                    println!("{} {}", "!".yellow(), report.message.yellow());
                } else {
                    println!("{} {}", "\u{2714}".green(), report.message);
                }
                if let Some(path) = report.artifact {
                    println!("  {}", path.display().to_string().bright_white());
                }
            }
            Err(e) => {
                println!("{} {}", "\u{2718}".red(), e.to_string().red());
            }
        }
    }
}

/// Read one line with `initial` pre-filled; `None` on Ctrl+C or Ctrl+D
fn read_field(rl: &mut DefaultEditor, prompt: &str, initial: &str) -> Result<Option<String>> {
    match rl.readline_with_initial(prompt, (initial, "")) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}

fn print_review(snapshot: &WizardSnapshot) {
    println!();
    println!("{}", "Review Your Plan".bright_cyan().bold());
    println!("{}", snapshot.document.review());
    println!();
}

fn print_history(snapshot: &WizardSnapshot) {
    if snapshot.history.is_empty() {
        println!("{}", "No generation history.".dimmed());
        return;
    }

    println!();
    println!("{}", "Generation History:".bright_cyan());
    for (i, entry) in snapshot.history.iter().enumerate() {
        let preview: String = entry.text.chars().take(60).collect();
        let preview = if entry.text.chars().count() > 60 {
            format!("{}...", preview)
        } else {
            preview
        };
        println!(
            "  {}. {} {}: {}",
            i + 1,
            entry.at.format("%H:%M:%S").to_string().dimmed(),
            entry.kind.to_string().bright_blue(),
            preview.replace('\n', " ")
        );
    }
    println!();
}
