//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the 200-character storage limit.
    #[error("task title exceeds 200 character limit: {0}")]
    TaskTitleTooLong(String),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
