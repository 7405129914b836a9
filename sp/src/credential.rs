//! Credential holder for the remote service bearer token
//!
//! The token is kept in memory only and never appears in logs: `Debug`
//! prints a redacted placeholder.

use std::fmt;

use tracing::debug;

use crate::wizard::ValidationError;

/// Opaque bearer token supplied by the user
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: String,
    validated: bool,
}

impl Credential {
    /// Create an empty credential
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token, rejecting empty or whitespace-only input
    ///
    /// Storing a token always clears the validated flag; the caller has to
    /// probe the service again before the token counts as accepted.
    pub fn set(&mut self, token: &str) -> Result<(), ValidationError> {
        debug!(token_len = token.len(), "Credential::set: called");
        if token.trim().is_empty() {
            debug!("Credential::set: empty token rejected");
            return Err(ValidationError::EmptyCredential);
        }
        self.token = token.to_string();
        self.validated = false;
        Ok(())
    }

    /// Current token, empty string if unset
    pub fn get(&self) -> &str {
        &self.token
    }

    pub fn is_set(&self) -> bool {
        !self.token.is_empty()
    }

    /// Whether the remote service has accepted this token
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub(crate) fn mark_validated(&mut self, validated: bool) {
        debug!(%validated, "Credential::mark_validated: called");
        self.validated = validated && self.is_set();
    }

    /// Token for an outgoing request, failing loudly when none is stored
    pub fn require(&self) -> Result<&str, ValidationError> {
        if self.is_set() {
            Ok(&self.token)
        } else {
            Err(ValidationError::EmptyCredential)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &if self.is_set() { "<redacted>" } else { "<empty>" })
            .field("validated", &self.validated)
            .finish()
    }
}
