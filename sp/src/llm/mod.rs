//! LLM Client module for StratPlan
//!
//! Provides the credential probe and completion requests against the remote
//! chat-completion service.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::{LlmClient, StubLlmClient, StubReply};
pub use error::{AuthError, COMPLETION_FAILED, CompletionError, LlmError};
pub use openai::OpenAIClient;
pub use types::{ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse, Role};

use crate::config::LlmConfig;

/// Create the LLM client described by config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(model = %config.model, base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(OpenAIClient::from_config(config)?))
}
