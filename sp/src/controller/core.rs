//! StepController - owns the wizard context and applies actions

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Action, ActionKind, BusyFlag, StepError, StepStatus};
use crate::credential::Credential;
use crate::export::Exporter;
use crate::llm::LlmClient;
use crate::prompts::{PromptContext, PromptKind, PromptLoader};
use crate::wizard::{Field, HistoryEntry, PlanDocument, Stage, ValidationError, WizardState};

/// Outcome of a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub kind: ActionKind,
    /// Status text written to the action's section
    pub message: String,
    /// Stage after the action
    pub stage: Stage,
    /// The completion failed and a placeholder was stored instead
    pub degraded: bool,
    /// Path of the exported report, for save-report
    pub artifact: Option<PathBuf>,
}

/// Read-only copy of the wizard state the UI renders
///
/// Snapshots are answered between actions, so busy state is read from
/// [`BusyFlag`] instead.
#[derive(Debug, Clone)]
pub struct WizardSnapshot {
    pub stage: Stage,
    pub document: PlanDocument,
    pub status: StepStatus,
    pub history: Vec<HistoryEntry>,
    pub credential_set: bool,
    /// The planning steps are shown only once the key has validated
    pub planning_visible: bool,
}

/// The wizard context: credential, plan document and status text
pub struct StepController {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    exporter: Exporter,
    credential: Credential,
    wizard: WizardState,
    status: StepStatus,
    busy: BusyFlag,
}

impl StepController {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, exporter: Exporter) -> Self {
        debug!(export_dir = %exporter.dir().display(), "StepController::new: called");
        Self {
            llm,
            prompts,
            exporter,
            credential: Credential::new(),
            wizard: WizardState::new(),
            status: StepStatus::default(),
            busy: BusyFlag::new(),
        }
    }

    /// Handle to the busy indicator, shareable with the UI
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn stage(&self) -> Stage {
        self.wizard.stage(&self.credential)
    }

    pub fn document(&self) -> &PlanDocument {
        self.wizard.document()
    }

    pub fn status(&self) -> &StepStatus {
        &self.status
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            stage: self.stage(),
            document: self.wizard.document().clone(),
            status: self.status.clone(),
            history: self.wizard.history().to_vec(),
            credential_set: self.credential.is_set(),
            planning_visible: self.credential.is_validated(),
        }
    }

    /// Apply one action
    ///
    /// The busy flag is held for the whole call. The result, success or
    /// failure, becomes the status text of the action's section.
    pub async fn dispatch(&mut self, action: Action) -> Result<StepReport, StepError> {
        let kind = action.kind();
        debug!(%kind, stage = %self.stage(), "dispatch: called");
        let _busy = self.busy.acquire();

        let result = match action {
            Action::ValidateKey { token } => self.validate_key(&token).await,
            Action::SubmitGoals {
                objective,
                metrics,
                timeline,
                category,
            } => self.submit_goals(&objective, &metrics, &timeline, &category),
            Action::GenerateOutcomes => self.generate_outcomes().await,
            Action::GeneratePlan { selected_outcome } => self.generate_plan(selected_outcome).await,
            Action::GenerateRewards { selected_outcome } => self.generate_rewards(selected_outcome).await,
            Action::RefinePlan { feedback } => self.refine_plan(&feedback).await,
            Action::GenerateReport => self.generate_report(),
            Action::SaveReport { filename } => self.save_report(&filename),
            Action::ResetForm => Ok(self.reset()),
        };

        let result = result.map(|(message, degraded, artifact)| StepReport {
            kind,
            message,
            stage: self.stage(),
            degraded,
            artifact,
        });

        if let Some(section) = kind.section() {
            match &result {
                Ok(report) => self.status.set(section, report.message.clone()),
                Err(e) => {
                    debug!(%kind, error = %e, "dispatch: action failed");
                    self.status.set(section, e.to_string());
                }
            }
        }

        result
    }

    fn require(&self, kind: ActionKind) -> Result<(), StepError> {
        let Some(required) = kind.required_stage() else {
            return Ok(());
        };
        let current = self.stage();
        if current < required {
            debug!(%kind, %required, %current, "require: precondition not met");
            return Err(StepError::PreconditionNotMet {
                action: kind,
                required,
                current,
            });
        }
        Ok(())
    }

    async fn validate_key(&mut self, token: &str) -> StepResult {
        debug!("validate_key: called");
        self.credential.set(token)?;

        match self.llm.validate_credential(self.credential.get()).await {
            Ok(()) => {
                self.credential.mark_validated(true);
                info!("API key validated");
                Ok(("API Key validated!".to_string(), false, None))
            }
            Err(e) => {
                self.credential.mark_validated(false);
                warn!(error = %e, "API key validation failed");
                Err(e.into())
            }
        }
    }

    fn submit_goals(&mut self, objective: &str, metrics: &str, timeline: &str, category: &str) -> StepResult {
        debug!("submit_goals: called");
        self.require(ActionKind::SubmitGoals)?;
        self.wizard.save_goals(objective, metrics, timeline, category)?;
        Ok(("Goals saved!".to_string(), false, None))
    }

    async fn generate_outcomes(&mut self) -> StepResult {
        debug!("generate_outcomes: called");
        self.require(ActionKind::GenerateOutcomes)?;
        let (text, degraded) = self.generate(PromptKind::Outcomes, None).await?;
        self.wizard.record_outcomes(text);
        Ok((generated_message("Outcomes", degraded), degraded, None))
    }

    async fn generate_plan(&mut self, selected_outcome: String) -> StepResult {
        debug!("generate_plan: called");
        self.require(ActionKind::GeneratePlan)?;
        require_text(&selected_outcome, Field::SelectedOutcome)?;
        self.wizard.select_outcome(selected_outcome);
        let (text, degraded) = self.generate(PromptKind::Plan, None).await?;
        self.wizard.record_plan(text);
        Ok((generated_message("Plan", degraded), degraded, None))
    }

    async fn generate_rewards(&mut self, selected_outcome: String) -> StepResult {
        debug!("generate_rewards: called");
        self.require(ActionKind::GenerateRewards)?;
        require_text(&selected_outcome, Field::SelectedOutcome)?;
        self.wizard.select_outcome(selected_outcome);
        let (text, degraded) = self.generate(PromptKind::Rewards, None).await?;
        self.wizard.record_rewards(text);
        Ok((generated_message("Rewards", degraded), degraded, None))
    }

    async fn refine_plan(&mut self, feedback: &str) -> StepResult {
        debug!("refine_plan: called");
        self.require(ActionKind::RefinePlan)?;
        require_text(feedback, Field::Feedback)?;
        let (text, degraded) = self.generate(PromptKind::Refine, Some(feedback)).await?;
        self.wizard.record_refined_plan(text);
        Ok((generated_message("Refined plan", degraded), degraded, None))
    }

    fn generate_report(&mut self) -> StepResult {
        debug!("generate_report: called");
        self.require(ActionKind::GenerateReport)?;
        let report = self.wizard.compile_report();
        info!(report_len = report.len(), "Report compiled");
        Ok(("Report generated!".to_string(), false, None))
    }

    fn save_report(&mut self, filename: &str) -> StepResult {
        debug!(%filename, "save_report: called");
        self.require(ActionKind::SaveReport)?;
        let path = self
            .exporter
            .export_report(&self.wizard.document().report, filename)?;
        Ok(("Report saved!".to_string(), false, Some(path)))
    }

    /// Clear the form; the token stays stored but must be validated again
    fn reset(&mut self) -> (String, bool, Option<PathBuf>) {
        debug!("reset: called");
        self.wizard.reset();
        self.credential.mark_validated(false);
        self.status.clear();
        info!("Wizard reset");
        ("Form reset.".to_string(), false, None)
    }

    /// Render the prompt and run one completion
    ///
    /// A failed completion yields the placeholder text and `true`.
    async fn generate(&self, kind: PromptKind, feedback: Option<&str>) -> Result<(String, bool), StepError> {
        debug!(%kind, "generate: called");
        let token = self.credential.require()?;

        let mut context = PromptContext::from_document(self.wizard.document());
        if let Some(feedback) = feedback {
            context = context.with_feedback(feedback);
        }
        let prompt = self
            .prompts
            .render(kind, &context)
            .map_err(|e| StepError::Prompt(e.to_string()))?;

        match self.llm.complete(&prompt, token).await {
            Ok(text) => {
                info!(%kind, text_len = text.len(), "Completion received");
                Ok((text, false))
            }
            Err(e) => {
                warn!(%kind, cause = %e.cause(), "Completion failed, storing placeholder");
                Ok((e.to_string(), true))
            }
        }
    }
}

/// Message, degraded flag, exported artifact
type StepResult = Result<(String, bool, Option<PathBuf>), StepError>;

fn require_text(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn generated_message(what: &str, degraded: bool) -> String {
    if degraded {
        format!("{} generation failed. Try again.", what)
    } else {
        format!("{} generated.", what)
    }
}
