//! Per-request actor context.

use crate::identity::domain::{Role, User, UserId};
use serde::{Deserialize, Serialize};

/// Authenticated identity performing an operation.
///
/// Passed explicitly into every core operation; the core never reads
/// actor state from ambient storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the authenticated user.
    pub id: UserId,
    /// Role carried by the authenticated user.
    pub role: Role,
}

impl Actor {
    /// Creates an actor context from an id and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.role())
    }
}
