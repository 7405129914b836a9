//! Per-section status text

use serde::Serialize;

/// Status regions of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Api,
    Goals,
    Planning,
    Save,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Api, Section::Goals, Section::Planning, Section::Save];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Api => "API",
            Section::Goals => "Goals",
            Section::Planning => "Planning",
            Section::Save => "Save",
        }
    }
}

/// Transient status text, overwritten by every action in the section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    api: String,
    goals: String,
    planning: String,
    save: String,
}

impl StepStatus {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Api => &self.api,
            Section::Goals => &self.goals,
            Section::Planning => &self.planning,
            Section::Save => &self.save,
        }
    }

    pub fn set(&mut self, section: Section, text: impl Into<String>) {
        let slot = match section {
            Section::Api => &mut self.api,
            Section::Goals => &mut self.goals,
            Section::Planning => &mut self.planning,
            Section::Save => &mut self.save,
        };
        *slot = text.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
