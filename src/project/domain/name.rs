//! Validated project name type.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(120)` column.
const MAX_NAME_LENGTH: usize = 120;

/// Validated display name for a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the value is
    /// empty after trimming, or [`ProjectDomainError::ProjectNameTooLong`]
    /// when it exceeds 120 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::ProjectNameTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
