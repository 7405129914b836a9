//! LlmClient trait definition

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::{AuthError, CompletionError, LlmError};

/// Stateless client for the remote completion service
///
/// Every call carries the bearer token explicitly; the client holds no
/// credential of its own. Each call is a single request/response with no
/// retries.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Probe the service with `token`; success means it was accepted
    async fn validate_credential(&self, token: &str) -> Result<(), AuthError>;

    /// Send `prompt` under the fixed system instruction and return the reply text
    async fn complete(&self, prompt: &str, token: &str) -> Result<String, CompletionError>;
}

/// Which tokens a [`StubLlmClient`] accepts
#[derive(Clone)]
enum TokenPolicy {
    Any,
    Only(String),
    Reject,
}

impl TokenPolicy {
    /// Variant name only; `Only` carries a token
    fn label(&self) -> &'static str {
        match self {
            TokenPolicy::Any => "any",
            TokenPolicy::Only(_) => "only",
            TokenPolicy::Reject => "reject",
        }
    }
}

/// Scripted reply for a [`StubLlmClient`] completion
#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Fail(String),
}

/// Scripted LLM client for tests and offline runs
///
/// Completions pop replies in order; once the script runs out every call
/// fails. Prompts are recorded so callers can assert on them.
pub struct StubLlmClient {
    policy: TokenPolicy,
    replies: Mutex<VecDeque<StubReply>>,
    prompts: Mutex<Vec<String>>,
    validation_count: AtomicUsize,
}

impl StubLlmClient {
    /// Stub that accepts any non-empty token
    pub fn accepting_any() -> Self {
        Self::with_policy(TokenPolicy::Any)
    }

    /// Stub that accepts exactly `token`
    pub fn accepting(token: impl Into<String>) -> Self {
        Self::with_policy(TokenPolicy::Only(token.into()))
    }

    /// Stub that rejects every token
    pub fn rejecting() -> Self {
        Self::with_policy(TokenPolicy::Reject)
    }

    fn with_policy(policy: TokenPolicy) -> Self {
        debug!(policy = policy.label(), "StubLlmClient::with_policy: called");
        Self {
            policy,
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            validation_count: AtomicUsize::new(0),
        }
    }

    /// Queue a successful completion
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(StubReply::Text(text.into()));
        self
    }

    /// Queue a failed completion
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(StubReply::Fail(reason.into()));
        self
    }

    fn push(&self, reply: StubReply) {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).push_back(reply);
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn completion_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn validation_count(&self) -> usize {
        self.validation_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StubLlmClient {
    async fn validate_credential(&self, token: &str) -> Result<(), AuthError> {
        debug!("StubLlmClient::validate_credential: called");
        self.validation_count.fetch_add(1, Ordering::SeqCst);
        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }
        match &self.policy {
            TokenPolicy::Any => Ok(()),
            TokenPolicy::Only(accepted) if accepted == token => Ok(()),
            _ => Err(AuthError::Rejected { status: 401 }),
        }
    }

    async fn complete(&self, prompt: &str, token: &str) -> Result<String, CompletionError> {
        debug!(prompt_len = prompt.len(), "StubLlmClient::complete: called");
        if token.is_empty() {
            return Err(LlmError::MissingCredential.into());
        }
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());

        let next = self.replies.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match next {
            Some(StubReply::Text(text)) => Ok(text),
            Some(StubReply::Fail(reason)) => Err(LlmError::InvalidResponse(reason).into()),
            None => {
                debug!("StubLlmClient::complete: no more stub replies");
                Err(LlmError::InvalidResponse("No more stub replies".to_string()).into())
            }
        }
    }
}
