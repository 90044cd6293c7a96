//! Credential input validation.
//!
//! The credential is an opaque token; the only rule the client enforces is
//! that something other than whitespace was entered. Whether the relay accepts
//! it is only learned from connection events.

use std::fmt;

use thiserror::Error;

/// Credential validation failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or whitespace only.
    #[error("credential is empty")]
    EmptyCredential,
}

/// Authentication token that passed validation.
///
/// # Invariants
///
/// The inner string is non-empty and has no surrounding whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate raw user input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCredential);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Token text, for placing in the authentication header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Validate raw credential input. Same as [`Credential::parse`].
pub fn validate(raw: &str) -> Result<Credential, ValidationError> {
    Credential::parse(raw)
}
