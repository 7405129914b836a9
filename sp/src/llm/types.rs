//! Chat-completion request/response types
//!
//! Only the slice of the Chat Completions wire format the wizard uses:
//! a system instruction plus one user prompt in, `choices[0].message.content` out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LlmError;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Body of a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Build the two-message request: fixed instruction, then the prompt
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        let model = model.into();
        debug!(%model, "ChatRequest::new: called");
        Self {
            model,
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)],
        }
    }
}

/// Body of a chat-completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Parse a raw response body
    pub fn parse(body: &str) -> Result<Self, LlmError> {
        debug!(body_len = body.len(), "ChatResponse::parse: called");
        Ok(serde_json::from_str(body)?)
    }

    /// Text of the first choice
    pub fn into_text(self) -> Result<String, LlmError> {
        debug!(choice_count = self.choices.len(), "ChatResponse::into_text: called");
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("first choice has no message content".to_string()))
    }
}
