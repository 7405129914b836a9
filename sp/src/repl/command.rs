//! Parsing of wizard REPL input

use std::fmt;

use tracing::debug;

use crate::controller::ActionKind;

/// A wizard step the user can run by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Key,
    Goals,
    Outcomes,
    Plan,
    Rewards,
    Refine,
    Report,
    Save,
}

impl WizardStep {
    /// Every step, in wizard order
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Key,
        WizardStep::Goals,
        WizardStep::Outcomes,
        WizardStep::Plan,
        WizardStep::Rewards,
        WizardStep::Refine,
        WizardStep::Report,
        WizardStep::Save,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Key => "key",
            WizardStep::Goals => "goals",
            WizardStep::Outcomes => "outcomes",
            WizardStep::Plan => "plan",
            WizardStep::Rewards => "rewards",
            WizardStep::Refine => "refine",
            WizardStep::Report => "report",
            WizardStep::Save => "save",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Key => "Enter and validate your API key",
            WizardStep::Goals => "Set objective, metrics, timeline and category",
            WizardStep::Outcomes => "Generate measurable outcomes from your goals",
            WizardStep::Plan => "Generate a step-by-step plan for an outcome",
            WizardStep::Rewards => "Suggest rewards for the plan",
            WizardStep::Refine => "Refine the plan with your feedback",
            WizardStep::Report => "Compile the strategic plan document",
            WizardStep::Save => "Save the report as a text file",
        }
    }

    pub fn action_kind(&self) -> ActionKind {
        match self {
            WizardStep::Key => ActionKind::ValidateKey,
            WizardStep::Goals => ActionKind::SubmitGoals,
            WizardStep::Outcomes => ActionKind::GenerateOutcomes,
            WizardStep::Plan => ActionKind::GeneratePlan,
            WizardStep::Rewards => ActionKind::GenerateRewards,
            WizardStep::Refine => ActionKind::RefinePlan,
            WizardStep::Report => ActionKind::GenerateReport,
            WizardStep::Save => ActionKind::SaveReport,
        }
    }

    /// Steps after the key only appear once the key has validated
    pub fn in_planning_section(&self) -> bool {
        !matches!(self, WizardStep::Key)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Step(WizardStep),
    Help,
    Status,
    Review,
    History,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        debug!(%input, "ReplCommand::parse: called");
        let word = input.split_whitespace().next().unwrap_or("").to_lowercase();

        if let Some(slash) = word.strip_prefix('/') {
            return match slash {
                "help" | "h" | "?" => ReplCommand::Help,
                "status" | "s" => ReplCommand::Status,
                "review" | "r" => ReplCommand::Review,
                "history" => ReplCommand::History,
                "reset" => ReplCommand::Reset,
                "quit" | "q" | "exit" => ReplCommand::Quit,
                _ => ReplCommand::Unknown(word),
            };
        }

        WizardStep::ALL
            .iter()
            .copied()
            .find(|step| step.name() == word)
            .map(ReplCommand::Step)
            .unwrap_or(ReplCommand::Unknown(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        for step in WizardStep::ALL {
            assert_eq!(ReplCommand::parse(step.name()), ReplCommand::Step(step));
        }
        assert_eq!(ReplCommand::parse("  PLAN "), ReplCommand::Step(WizardStep::Plan));
    }

    #[test]
    fn test_parse_slash_commands() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/status"), ReplCommand::Status);
        assert_eq!(ReplCommand::parse("/review"), ReplCommand::Review);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/reset"), ReplCommand::Reset);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ReplCommand::parse("/launch"), ReplCommand::Unknown("/launch".to_string()));
        assert_eq!(ReplCommand::parse("dance"), ReplCommand::Unknown("dance".to_string()));
    }

    #[test]
    fn test_only_key_outside_planning_section() {
        let outside: Vec<_> = WizardStep::ALL.iter().filter(|s| !s.in_planning_section()).collect();
        assert_eq!(outside, vec![&WizardStep::Key]);
    }

    #[test]
    fn test_steps_map_to_distinct_actions() {
        let kinds: Vec<_> = WizardStep::ALL.iter().map(|s| s.action_kind()).collect();
        assert!(!kinds.contains(&ActionKind::ResetForm));
        for (i, kind) in kinds.iter().enumerate() {
            assert!(!kinds[i + 1..].contains(kind));
        }
    }
}
