//! The plan document built up by the wizard

use serde::{Deserialize, Serialize};

use super::GoalSpec;

/// Heading of every compiled report
pub const REPORT_TITLE: &str = "Strategic Plan Document";

/// In-progress plan: goals plus every generated section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub goals: GoalSpec,
    pub outcomes: String,
    pub selected_outcome: String,
    pub plan: String,
    pub rewards: String,
    pub report: String,
}

impl PlanDocument {
    /// Render the report text
    ///
    /// Literal interpolation in a fixed order: the four goal fields, then
    /// outcomes, plan and rewards separated by blank lines. Embedded newlines
    /// are kept as-is.
    pub fn render_report(&self) -> String {
        let underline = "=".repeat(REPORT_TITLE.len());
        format!(
            "{REPORT_TITLE}\n{underline}\nObjective: {}\nMetrics: {}\nTimeline: {}\nCategory: {}\n\n{}\n\n{}\n\n{}",
            self.goals.objective,
            self.goals.metrics,
            self.goals.timeline,
            self.goals.category,
            self.outcomes,
            self.plan,
            self.rewards,
        )
    }

    /// Human-oriented overview of the current document
    pub fn review(&self) -> String {
        format!(
            "Goals:\n{}\n\nOutcome:\n{}\n\nPlan:\n{}\n\nRewards:\n{}",
            self.goals.summary(),
            self.selected_outcome,
            self.plan,
            self.rewards
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlanDocument {
        PlanDocument {
            goals: GoalSpec::new("Lose weight", "5kg", "3 months", "Health").unwrap(),
            outcomes: "Lose 1kg/week".to_string(),
            selected_outcome: "Lose 1kg/week".to_string(),
            plan: "Walk daily".to_string(),
            rewards: "Buy new shoes".to_string(),
            report: String::new(),
        }
    }

    #[test]
    fn test_render_report_exact_layout() {
        let report = sample().render_report();
        assert_eq!(
            report,
            "Strategic Plan Document\n\
             =======================\n\
             Objective: Lose weight\n\
             Metrics: 5kg\n\
             Timeline: 3 months\n\
             Category: Health\n\
             \n\
             Lose 1kg/week\n\
             \n\
             Walk daily\n\
             \n\
             Buy new shoes"
        );
    }

    #[test]
    fn test_render_report_keeps_embedded_newlines() {
        let mut doc = sample();
        doc.plan = "1. Walk\n2. Swim".to_string();
        assert!(doc.render_report().contains("\n\n1. Walk\n2. Swim\n\n"));
    }

    #[test]
    fn test_render_report_of_empty_document() {
        let report = PlanDocument::default().render_report();
        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Objective: \nMetrics: \nTimeline: \nCategory: \n"));
    }

    #[test]
    fn test_review_sections() {
        let review = sample().review();
        assert!(review.starts_with("Goals:\nObjective: Lose weight"));
        assert!(review.contains("Outcome:\nLose 1kg/week"));
        assert!(review.contains("Plan:\nWalk daily"));
        assert!(review.ends_with("Rewards:\nBuy new shoes"));
    }
}
