//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::wizard::PlanDocument;

/// The completion steps that send a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Outcomes,
    Plan,
    Rewards,
    Refine,
}

impl PromptKind {
    /// Get the template name for this prompt
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Outcomes => "outcomes",
            Self::Plan => "plan",
            Self::Rewards => "rewards",
            Self::Refine => "refine",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// Context for rendering prompt templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    /// Goal summary (`Objective: ...` four-line block)
    pub goals: String,
    /// Outcome the user picked to plan for
    pub selected_outcome: String,
    /// Current plan text
    pub plan: String,
    /// Feedback for a refinement pass
    pub feedback: String,
}

impl PromptContext {
    /// Create a context from the current document
    pub fn from_document(document: &PlanDocument) -> Self {
        debug!("PromptContext::from_document: called");
        Self {
            goals: document.goals.summary(),
            selected_outcome: document.selected_outcome.clone(),
            plan: document.plan.clone(),
            feedback: String::new(),
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.stratplan/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at `workdir`
    ///
    /// Templates in `<workdir>/.stratplan/prompts/{name}.pmt` override the
    /// embedded defaults.
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        let user_dir = workdir.as_ref().join(".stratplan/prompts");
        let user_dir_exists = user_dir.exists();
        debug!(?user_dir, %user_dir_exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            user_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text; user input must reach the model unescaped
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks the user override directory first, then the embedded defaults.
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in user override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        embedded::get_embedded(name)
            .map(str::to_string)
            .ok_or_else(|| eyre!("Prompt template not found: {}", name))
    }

    /// Render the prompt for `kind` with the given context
    pub fn render(&self, kind: PromptKind, context: &PromptContext) -> Result<String> {
        debug!(%kind, "PromptLoader::render: called");
        let template = self.load_template(kind.template_name())?;
        info!("Rendering template '{}'", kind);

        // Only the template's trailing newline goes; user text is sent as entered
        self.hbs
            .render_template(template.trim_end(), context)
            .map_err(|e| eyre!("Failed to render template {}: {}", kind, e))
    }
}
