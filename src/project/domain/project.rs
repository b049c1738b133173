//! Project aggregate root.

use super::{ProjectId, ProjectName};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Status assigned to newly created projects.
///
/// Project status is a simple descriptive field, not a state machine.
const DEFAULT_STATUS: &str = "active";

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    status: String,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status value.
    pub status: String,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project.
    ///
    /// The creator is recorded but NOT enrolled as a member; membership
    /// is only ever granted explicitly.
    #[must_use]
    pub fn new(
        name: ProjectName,
        description: Option<String>,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description,
            status: DEFAULT_STATUS.to_owned(),
            created_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the descriptive status value.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
