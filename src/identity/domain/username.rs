//! Validated username type.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(80)` column.
const MAX_USERNAME_LENGTH: usize = 80;

/// Validated unique login name for a registered user.
///
/// The input is trimmed; uniqueness is enforced by the repository with an
/// exact match on the trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUsername`] when the value is
    /// empty after trimming, or [`IdentityDomainError::UsernameTooLong`]
    /// when it exceeds 80 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyUsername);
        }

        if normalized.chars().count() > MAX_USERNAME_LENGTH {
            return Err(IdentityDomainError::UsernameTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
