//! User story record archived against a project.

use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned while validating story generation input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoryDomainError {
    /// The project description is empty after trimming.
    #[error("project description is required")]
    EmptyDescription,
}

/// Unique identifier for an archived user story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(Uuid);

impl StoryId {
    /// Creates a new random story identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a story identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for StoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generated user story archived against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    /// Story identifier.
    pub id: StoryId,
    /// Project the story was generated for.
    pub project_id: ProjectId,
    /// Story text.
    pub story: String,
    /// Archival timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserStory {
    /// Creates a story record for archival.
    #[must_use]
    pub fn new(project_id: ProjectId, story: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: StoryId::new(),
            project_id,
            story: story.into(),
            created_at: clock.utc(),
        }
    }
}
