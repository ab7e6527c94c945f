//! Email addresses.

use std::fmt;

use quizmaster_core::error::DomainError;
use serde::Serialize;

/// A syntactically plausible email address.
///
/// Only the shape `local@domain.tld` is checked; deliverability is the
/// dispatcher's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and trims `raw`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `raw` is not of the form
    /// `local@domain.tld` or contains whitespace.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let candidate = raw.trim();
        let invalid = || DomainError::InvalidInput(format!("invalid email address: {candidate:?}"));

        if candidate.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = candidate.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(invalid());
        }
        Ok(Self(candidate.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
