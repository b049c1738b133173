//! Project membership relation.

use super::ProjectId;
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Fact that a user may be assigned tasks within a project.
///
/// Memberships form a set: a `(project, user)` pair either exists or it
/// does not, with no duplicates and no ordering semantics. Equality is
/// the pair itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    /// Project the user belongs to.
    pub project_id: ProjectId,
    /// User enrolled in the project.
    pub user_id: UserId,
}

impl Membership {
    /// Creates a membership pair.
    #[must_use]
    pub const fn new(project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            project_id,
            user_id,
        }
    }
}
