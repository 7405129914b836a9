//! OpenAI API client implementation
//!
//! Implements the LlmClient trait against the Chat Completions API: a GET on
//! the models listing to probe a key, a POST on chat completions to generate.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AuthError, ChatRequest, ChatResponse, CompletionError, LlmClient, LlmError};
use crate::config::LlmConfig;

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    system_prompt: String,
    base_url: String,
    http: Client,
}

impl OpenAIClient {
    /// Create a new client from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(
            model = %config.model,
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "from_config: called"
        );
        let mut builder = Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        } else {
            debug!("from_config: timeout disabled");
        }
        let http = builder.build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url)
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Build the request body for the chat completions endpoint
    fn build_request_body(&self, prompt: &str) -> ChatRequest {
        debug!(%self.model, prompt_len = prompt.len(), "build_request_body: called");
        ChatRequest::new(&self.model, &self.system_prompt, prompt)
    }

    /// One completion round trip with the detailed error kept intact
    async fn request_completion(&self, prompt: &str, token: &str) -> Result<String, LlmError> {
        debug!(%self.model, "request_completion: called");
        if token.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let body = self.build_request_body(prompt);
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "request_completion: API error");
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("request_completion: success");
        ChatResponse::parse(&text)?.into_text()
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn validate_credential(&self, token: &str) -> Result<(), AuthError> {
        debug!("validate_credential: called");
        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let response = self.http.get(self.models_url()).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!("validate_credential: accepted");
            Ok(())
        } else {
            debug!(status = status.as_u16(), "validate_credential: rejected");
            Err(AuthError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    async fn complete(&self, prompt: &str, token: &str) -> Result<String, CompletionError> {
        debug!(prompt_len = prompt.len(), "complete: called");
        self.request_completion(prompt, token).await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "complete: generation failed");
            CompletionError::from(e)
        })
    }
}
