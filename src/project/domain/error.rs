//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the 120-character storage limit.
    #[error("project name exceeds 120 character limit: {0}")]
    ProjectNameTooLong(String),
}
