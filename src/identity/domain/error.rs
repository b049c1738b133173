//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the 80-character storage limit.
    #[error("username exceeds 80 character limit: {0}")]
    UsernameTooLong(String),

    /// The raw password is shorter than the minimum length.
    #[error("password must be at least {minimum} characters, got {actual}")]
    PasswordTooShort {
        /// Required minimum number of characters.
        minimum: usize,
        /// Number of characters supplied.
        actual: usize,
    },
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
