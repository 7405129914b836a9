//! LLM error types

use thiserror::Error;

/// Text shown in place of a generation that failed for any reason
pub const COMPLETION_FAILED: &str = "Error generating response.";

/// Transport-level errors from the completion service
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is missing")]
    MissingCredential,

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// HTTP status of the failed call, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            LlmError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the request ran into the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, LlmError::Network(e) if e.is_timeout())
    }
}

/// Failure of the credential probe
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("API Key is required!")]
    MissingCredential,

    #[error("Invalid API Key")]
    Rejected { status: u16 },

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(e.to_string())
    }
}

/// Failure of a completion request
///
/// Always displays the generic placeholder; the underlying cause is kept
/// as the error source for logging.
#[derive(Debug, Error)]
#[error("Error generating response.")]
pub struct CompletionError {
    #[source]
    cause: LlmError,
}

impl CompletionError {
    /// The transport-level error behind this failure
    pub fn cause(&self) -> &LlmError {
        &self.cause
    }
}

impl From<LlmError> for CompletionError {
    fn from(cause: LlmError) -> Self {
        Self { cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_displays_placeholder() {
        let err = CompletionError::from(LlmError::InvalidResponse("no choices".to_string()));
        assert_eq!(err.to_string(), COMPLETION_FAILED);
        assert!(matches!(err.cause(), LlmError::InvalidResponse(msg) if msg == "no choices"));
    }

    #[test]
    fn test_completion_error_keeps_source() {
        use std::error::Error as _;

        let err = CompletionError::from(LlmError::ApiError {
            status: 500,
            message: "Server error".to_string(),
        });
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("API error 500: Server error"));
    }

    #[test]
    fn test_status() {
        let err = LlmError::ApiError {
            status: 401,
            message: "nope".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(LlmError::InvalidResponse("x".to_string()).status(), None);
        assert!(!LlmError::MissingCredential.is_timeout());
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::Rejected { status: 401 }.to_string(), "Invalid API Key");
        assert_eq!(AuthError::MissingCredential.to_string(), "API Key is required!");
        assert_eq!(
            AuthError::Transport("connection refused".to_string()).to_string(),
            "connection refused"
        );
    }
}
