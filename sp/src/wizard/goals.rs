//! Strategic goal specification

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Field, ValidationError};

/// Categories offered as suggestions; any non-empty category is accepted
pub const SUGGESTED_CATEGORIES: [&str; 4] = ["Financial", "Operational", "Marketing", "Other"];

/// The four goal fields a plan is built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub objective: String,
    pub metrics: String,
    pub timeline: String,
    pub category: String,
}

impl GoalSpec {
    /// Build a goal spec, requiring every field to be non-blank
    pub fn new(
        objective: impl Into<String>,
        metrics: impl Into<String>,
        timeline: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            objective: objective.into(),
            metrics: metrics.into(),
            timeline: timeline.into(),
            category: category.into(),
        };
        debug!(
            objective_len = spec.objective.len(),
            metrics_len = spec.metrics.len(),
            timeline_len = spec.timeline.len(),
            category_len = spec.category.len(),
            "GoalSpec::new: called"
        );

        for (field, value) in [
            (Field::Objective, &spec.objective),
            (Field::Metrics, &spec.metrics),
            (Field::Timeline, &spec.timeline),
            (Field::Category, &spec.category),
        ] {
            if value.trim().is_empty() {
                debug!(%field, "GoalSpec::new: missing field");
                return Err(ValidationError::MissingField(field));
            }
        }

        Ok(spec)
    }

    /// Four-line summary used in prompts and the history log
    pub fn summary(&self) -> String {
        format!(
            "Objective: {}\nMetrics: {}\nTimeline: {}\nCategory: {}",
            self.objective, self.metrics, self.timeline, self.category
        )
    }

    /// Whether the category is one of the suggested ones
    pub fn has_suggested_category(&self) -> bool {
        SUGGESTED_CATEGORIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(self.category.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_complete_goals() {
        let goals = GoalSpec::new("Lose weight", "5kg", "3 months", "Health").unwrap();
        assert_eq!(goals.objective, "Lose weight");
        assert_eq!(goals.category, "Health");
        assert!(!goals.has_suggested_category());
    }

    #[test]
    fn test_new_reports_first_missing_field() {
        assert_eq!(
            GoalSpec::new("", "5kg", "3 months", "Health"),
            Err(ValidationError::MissingField(Field::Objective))
        );
        assert_eq!(
            GoalSpec::new("Lose weight", "5kg", "  ", "Health"),
            Err(ValidationError::MissingField(Field::Timeline))
        );
        assert_eq!(
            GoalSpec::new("Lose weight", "5kg", "3 months", ""),
            Err(ValidationError::MissingField(Field::Category))
        );
    }

    #[test]
    fn test_summary_layout() {
        let goals = GoalSpec::new("Grow revenue", "+20%", "Q4", "Financial").unwrap();
        assert_eq!(
            goals.summary(),
            "Objective: Grow revenue\nMetrics: +20%\nTimeline: Q4\nCategory: Financial"
        );
        assert!(goals.has_suggested_category());
    }
}
