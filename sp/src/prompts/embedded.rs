//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Break goals into outcomes
pub const OUTCOMES: &str = include_str!("../../prompts/outcomes.pmt");

/// Step-by-step plan for the selected outcome
pub const PLAN: &str = include_str!("../../prompts/plan.pmt");

/// Rewards for achieving the selected outcome
pub const REWARDS: &str = include_str!("../../prompts/rewards.pmt");

/// Rework the plan around user feedback
pub const REFINE: &str = include_str!("../../prompts/refine.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "outcomes" => Some(OUTCOMES),
        "plan" => Some(PLAN),
        "rewards" => Some(REWARDS),
        "refine" => Some(REFINE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_outcomes() {
        let outcomes = get_embedded("outcomes").unwrap();
        assert!(outcomes.starts_with("Based on these goals:"));
        assert!(outcomes.contains("{{goals}}"));
        assert!(outcomes.contains("time-bound achievable outcomes"));
    }

    #[test]
    fn test_get_embedded_selected_outcome_prompts() {
        for name in ["plan", "rewards", "refine"] {
            assert!(get_embedded(name).unwrap().contains("{{selected_outcome}}"), "{}", name);
        }
        assert!(get_embedded("refine").unwrap().contains("{{feedback}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
