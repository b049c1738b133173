//! User role enumeration.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user at registration.
///
/// Roles are immutable after creation; no promotion operation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A contributor who works on tasks within projects.
    Developer,
    /// A project manager who staffs projects and oversees tasks.
    Manager,
    /// An administrator with unrestricted access.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl Default for Role {
    /// Registration defaults to [`Role::Developer`] when no role is given.
    fn default() -> Self {
        Self::Developer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "developer" => Ok(Self::Developer),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
