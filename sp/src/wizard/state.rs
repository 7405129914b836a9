//! WizardState - the plan document plus step-completion flags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{GoalSpec, PlanDocument, ValidationError};
use crate::credential::Credential;

/// Where the wizard stands, in step order
///
/// Derived from the credential and the completion flags: the highest step
/// whose predecessors are all complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    KeyPending,
    KeyValidated,
    GoalsSaved,
    OutcomesGenerated,
    PlanGenerated,
    RewardsGenerated,
    ReportCompiled,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::KeyPending => "key pending",
            Stage::KeyValidated => "key validated",
            Stage::GoalsSaved => "goals saved",
            Stage::OutcomesGenerated => "outcomes generated",
            Stage::PlanGenerated => "plan generated",
            Stage::RewardsGenerated => "rewards generated",
            Stage::ReportCompiled => "report compiled",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryKind {
    Goals,
    Outcomes,
    Plan,
    RefinedPlan,
    Rewards,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HistoryKind::Goals => "goals",
            HistoryKind::Outcomes => "outcomes",
            HistoryKind::Plan => "plan",
            HistoryKind::RefinedPlan => "refined plan",
            HistoryKind::Rewards => "rewards",
        };
        write!(f, "{}", label)
    }
}

/// One saved or generated text, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Progress {
    goals_saved: bool,
    outcomes: bool,
    plan: bool,
    rewards: bool,
    report: bool,
}

/// The in-progress plan document and which steps have completed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    document: PlanDocument,
    progress: Progress,
    history: Vec<HistoryEntry>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &PlanDocument {
        &self.document
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn goals_saved(&self) -> bool {
        self.progress.goals_saved
    }

    /// Current stage given the credential status
    pub fn stage(&self, credential: &Credential) -> Stage {
        if !credential.is_set() {
            return Stage::Idle;
        }
        if !credential.is_validated() {
            return Stage::KeyPending;
        }

        let steps = [
            (self.progress.goals_saved, Stage::GoalsSaved),
            (self.progress.outcomes, Stage::OutcomesGenerated),
            (self.progress.plan, Stage::PlanGenerated),
            (self.progress.rewards, Stage::RewardsGenerated),
            (self.progress.report, Stage::ReportCompiled),
        ];

        steps
            .iter()
            .take_while(|(done, _)| *done)
            .last()
            .map(|(_, stage)| *stage)
            .unwrap_or(Stage::KeyValidated)
    }

    /// Store the goals; on error the previous goals are left untouched
    pub fn save_goals(
        &mut self,
        objective: &str,
        metrics: &str,
        timeline: &str,
        category: &str,
    ) -> Result<(), ValidationError> {
        debug!("save_goals: called");
        let goals = GoalSpec::new(objective, metrics, timeline, category)?;
        self.push_history(HistoryKind::Goals, goals.summary());
        self.document.goals = goals;
        self.progress.goals_saved = true;
        info!("Goals saved");
        Ok(())
    }

    pub fn record_outcomes(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(text_len = text.len(), "record_outcomes: called");
        self.push_history(HistoryKind::Outcomes, text.clone());
        self.document.outcomes = text;
        self.progress.outcomes = true;
    }

    pub fn select_outcome(&mut self, text: impl Into<String>) {
        self.document.selected_outcome = text.into();
        debug!(
            text_len = self.document.selected_outcome.len(),
            "select_outcome: called"
        );
    }

    pub fn record_plan(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(text_len = text.len(), "record_plan: called");
        self.push_history(HistoryKind::Plan, text.clone());
        self.document.plan = text;
        self.progress.plan = true;
    }

    /// Replace the plan with a refined version
    pub fn record_refined_plan(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(text_len = text.len(), "record_refined_plan: called");
        self.push_history(HistoryKind::RefinedPlan, text.clone());
        self.document.plan = text;
        self.progress.plan = true;
    }

    pub fn record_rewards(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(text_len = text.len(), "record_rewards: called");
        self.push_history(HistoryKind::Rewards, text.clone());
        self.document.rewards = text;
        self.progress.rewards = true;
    }

    /// Compile the report from the current document and store it
    pub fn compile_report(&mut self) -> String {
        debug!("compile_report: called");
        let report = self.document.render_report();
        self.document.report = report.clone();
        self.progress.report = true;
        report
    }

    /// Clear every field and flag back to the initial state
    pub fn reset(&mut self) {
        debug!("reset: called");
        *self = Self::default();
    }

    fn push_history(&mut self, kind: HistoryKind, text: String) {
        self.history.push(HistoryEntry {
            kind,
            text,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Field;
    use proptest::prelude::*;

    fn validated() -> Credential {
        let mut cred = Credential::new();
        cred.set("sk-test").unwrap();
        cred.mark_validated(true);
        cred
    }

    fn filled() -> WizardState {
        let mut state = WizardState::new();
        state.save_goals("Lose weight", "5kg", "3 months", "Health").unwrap();
        state.record_outcomes("Lose 1kg/week");
        state.select_outcome("Lose 1kg/week");
        state.record_plan("Walk daily");
        state.record_rewards("Buy new shoes");
        state
    }

    #[test]
    fn test_stage_follows_credential() {
        let state = WizardState::new();
        assert_eq!(state.stage(&Credential::new()), Stage::Idle);

        let mut cred = Credential::new();
        cred.set("sk-test").unwrap();
        assert_eq!(state.stage(&cred), Stage::KeyPending);

        cred.mark_validated(true);
        assert_eq!(state.stage(&cred), Stage::KeyValidated);
    }

    #[test]
    fn test_stage_advances_through_steps() {
        let cred = validated();
        let mut state = WizardState::new();

        state.save_goals("Lose weight", "5kg", "3 months", "Health").unwrap();
        assert_eq!(state.stage(&cred), Stage::GoalsSaved);
        state.record_outcomes("o");
        assert_eq!(state.stage(&cred), Stage::OutcomesGenerated);
        state.record_plan("p");
        assert_eq!(state.stage(&cred), Stage::PlanGenerated);
        state.record_rewards("r");
        assert_eq!(state.stage(&cred), Stage::RewardsGenerated);
        state.compile_report();
        assert_eq!(state.stage(&cred), Stage::ReportCompiled);
    }

    #[test]
    fn test_stage_stops_at_first_gap() {
        let cred = validated();
        let mut state = WizardState::new();
        state.save_goals("a", "b", "c", "d").unwrap();
        // Plan without outcomes does not skip ahead
        state.record_plan("p");
        assert_eq!(state.stage(&cred), Stage::GoalsSaved);
    }

    #[test]
    fn test_save_goals_missing_field_keeps_prior_goals() {
        let mut state = WizardState::new();
        state.save_goals("Lose weight", "5kg", "3 months", "Health").unwrap();
        let before = state.document().goals.clone();

        let err = state.save_goals("New objective", "", "1 month", "Other").unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Metrics));
        assert_eq!(state.document().goals, before);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_resubmitting_goals_overwrites() {
        let mut state = WizardState::new();
        state.save_goals("a", "b", "c", "d").unwrap();
        state.save_goals("w", "x", "y", "z").unwrap();
        assert_eq!(state.document().goals.objective, "w");
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_compile_report_contains_fields_in_order() {
        let mut state = filled();
        let report = state.compile_report();

        let values = [
            "Lose weight",
            "5kg",
            "3 months",
            "Health",
            "Lose 1kg/week",
            "Walk daily",
            "Buy new shoes",
        ];
        let mut cursor = 0;
        for value in values {
            let pos = report[cursor..].find(value).unwrap_or_else(|| panic!("{} missing", value));
            cursor += pos + value.len();
        }
        assert_eq!(state.document().report, report);
    }

    #[test]
    fn test_refined_plan_replaces_plan() {
        let mut state = filled();
        state.record_refined_plan("Walk and swim");
        assert_eq!(state.document().plan, "Walk and swim");
        assert_eq!(state.history().last().unwrap().kind, HistoryKind::RefinedPlan);
    }

    #[test]
    fn test_history_order() {
        let state = filled();
        let kinds: Vec<_> = state.history().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HistoryKind::Goals,
                HistoryKind::Outcomes,
                HistoryKind::Plan,
                HistoryKind::Rewards
            ]
        );
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let mut state = filled();
        state.compile_report();
        state.reset();

        assert_eq!(state, WizardState::new());
        assert_eq!(state.document(), &PlanDocument::default());
        assert!(state.history().is_empty());
        assert!(!state.goals_saved());
        assert_eq!(state.stage(&validated()), Stage::KeyValidated);
    }

    proptest! {
        #[test]
        fn prop_reset_is_idempotent(
            objective in "[a-z]{1,12}",
            outcomes in ".{0,40}",
            plan in ".{0,40}",
            compile in any::<bool>(),
        ) {
            let mut state = WizardState::new();
            state.save_goals(&objective, "m", "t", "c").unwrap();
            state.record_outcomes(outcomes);
            state.record_plan(plan);
            if compile {
                state.compile_report();
            }

            let mut once = state.clone();
            once.reset();
            let mut twice = state;
            twice.reset();
            twice.reset();

            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once, WizardState::new());
        }
    }
}
