//! Wizard actions
//!
//! One variant per button of the wizard. Field values the step reads are
//! carried in the variant, so dispatch never looks anything up by name.

use std::fmt;
use std::str::FromStr;

use super::Section;
use crate::wizard::Stage;

/// A user-selected wizard step with the form input it needs
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    ValidateKey {
        token: String,
    },
    SubmitGoals {
        objective: String,
        metrics: String,
        timeline: String,
        category: String,
    },
    GenerateOutcomes,
    GeneratePlan {
        selected_outcome: String,
    },
    GenerateRewards {
        selected_outcome: String,
    },
    RefinePlan {
        feedback: String,
    },
    GenerateReport,
    SaveReport {
        filename: String,
    },
    ResetForm,
}

impl Action {
    pub fn validate_key(token: impl Into<String>) -> Self {
        Action::ValidateKey { token: token.into() }
    }

    pub fn submit_goals(
        objective: impl Into<String>,
        metrics: impl Into<String>,
        timeline: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Action::SubmitGoals {
            objective: objective.into(),
            metrics: metrics.into(),
            timeline: timeline.into(),
            category: category.into(),
        }
    }

    pub fn generate_plan(selected_outcome: impl Into<String>) -> Self {
        Action::GeneratePlan {
            selected_outcome: selected_outcome.into(),
        }
    }

    pub fn generate_rewards(selected_outcome: impl Into<String>) -> Self {
        Action::GenerateRewards {
            selected_outcome: selected_outcome.into(),
        }
    }

    pub fn refine_plan(feedback: impl Into<String>) -> Self {
        Action::RefinePlan {
            feedback: feedback.into(),
        }
    }

    pub fn save_report(filename: impl Into<String>) -> Self {
        Action::SaveReport {
            filename: filename.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ValidateKey { .. } => ActionKind::ValidateKey,
            Action::SubmitGoals { .. } => ActionKind::SubmitGoals,
            Action::GenerateOutcomes => ActionKind::GenerateOutcomes,
            Action::GeneratePlan { .. } => ActionKind::GeneratePlan,
            Action::GenerateRewards { .. } => ActionKind::GenerateRewards,
            Action::RefinePlan { .. } => ActionKind::RefinePlan,
            Action::GenerateReport => ActionKind::GenerateReport,
            Action::SaveReport { .. } => ActionKind::SaveReport,
            Action::ResetForm => ActionKind::ResetForm,
        }
    }
}

// Hand-written so the token never reaches a log line
impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ValidateKey { .. } => f.debug_struct("ValidateKey").field("token", &"<redacted>").finish(),
            Action::SubmitGoals {
                objective,
                metrics,
                timeline,
                category,
            } => f
                .debug_struct("SubmitGoals")
                .field("objective", objective)
                .field("metrics", metrics)
                .field("timeline", timeline)
                .field("category", category)
                .finish(),
            Action::GeneratePlan { selected_outcome } => f
                .debug_struct("GeneratePlan")
                .field("selected_outcome", selected_outcome)
                .finish(),
            Action::GenerateRewards { selected_outcome } => f
                .debug_struct("GenerateRewards")
                .field("selected_outcome", selected_outcome)
                .finish(),
            Action::RefinePlan { feedback } => f.debug_struct("RefinePlan").field("feedback", feedback).finish(),
            Action::SaveReport { filename } => f.debug_struct("SaveReport").field("filename", filename).finish(),
            Action::GenerateOutcomes => write!(f, "GenerateOutcomes"),
            Action::GenerateReport => write!(f, "GenerateReport"),
            Action::ResetForm => write!(f, "ResetForm"),
        }
    }
}

/// Payload-free action discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ValidateKey,
    SubmitGoals,
    GenerateOutcomes,
    GeneratePlan,
    GenerateRewards,
    RefinePlan,
    GenerateReport,
    SaveReport,
    ResetForm,
}

impl ActionKind {
    /// Every action, in wizard order
    pub const ALL: [ActionKind; 9] = [
        ActionKind::ValidateKey,
        ActionKind::SubmitGoals,
        ActionKind::GenerateOutcomes,
        ActionKind::GeneratePlan,
        ActionKind::GenerateRewards,
        ActionKind::RefinePlan,
        ActionKind::GenerateReport,
        ActionKind::SaveReport,
        ActionKind::ResetForm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::ValidateKey => "validate-key",
            ActionKind::SubmitGoals => "submit-goals",
            ActionKind::GenerateOutcomes => "generate-outcomes",
            ActionKind::GeneratePlan => "generate-plan",
            ActionKind::GenerateRewards => "generate-rewards",
            ActionKind::RefinePlan => "refine-plan",
            ActionKind::GenerateReport => "generate-report",
            ActionKind::SaveReport => "save-report",
            ActionKind::ResetForm => "reset-form",
        }
    }

    /// Lowest stage at which this action may run, `None` if always allowed
    pub fn required_stage(&self) -> Option<Stage> {
        match self {
            ActionKind::ValidateKey | ActionKind::ResetForm => None,
            ActionKind::SubmitGoals => Some(Stage::KeyValidated),
            ActionKind::GenerateOutcomes => Some(Stage::GoalsSaved),
            ActionKind::GeneratePlan => Some(Stage::OutcomesGenerated),
            ActionKind::GenerateRewards | ActionKind::RefinePlan => Some(Stage::PlanGenerated),
            ActionKind::GenerateReport => Some(Stage::RewardsGenerated),
            ActionKind::SaveReport => Some(Stage::ReportCompiled),
        }
    }

    /// Status region this action reports into, `None` for reset
    pub fn section(&self) -> Option<Section> {
        match self {
            ActionKind::ValidateKey => Some(Section::Api),
            ActionKind::SubmitGoals => Some(Section::Goals),
            ActionKind::GenerateOutcomes
            | ActionKind::GeneratePlan
            | ActionKind::GenerateRewards
            | ActionKind::RefinePlan
            | ActionKind::GenerateReport => Some(Section::Planning),
            ActionKind::SaveReport => Some(Section::Save),
            ActionKind::ResetForm => None,
        }
    }

    /// Whether this action sends a completion request
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            ActionKind::GenerateOutcomes
                | ActionKind::GeneratePlan
                | ActionKind::GenerateRewards
                | ActionKind::RefinePlan
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}
