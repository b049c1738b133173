//! Ports for story generation and archival.

use super::domain::UserStory;
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the external story generator.
///
/// Passed through to the caller unchanged; the core neither retries nor
/// reinterprets them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoryGeneratorError {
    /// The generator has no usable configuration (for example a missing
    /// API key).
    #[error("story generator is not configured")]
    NotConfigured,

    /// The upstream text-generation call failed.
    #[error("story generation failed: {0}")]
    Upstream(String),
}

/// Opaque external text-generation capability.
///
/// The core treats generation as a black box that turns a free-text
/// description into a list of user story lines.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generates user story lines from a project description.
    ///
    /// # Errors
    ///
    /// Returns a [`StoryGeneratorError`] that the core passes through
    /// unchanged.
    async fn generate(&self, description: &str) -> Result<Vec<String>, StoryGeneratorError>;
}

/// Result type for story repository operations.
pub type StoryRepositoryResult<T> = Result<T, StoryRepositoryError>;

/// Archival contract for generated stories.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Archives generated stories against a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoryRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn append(&self, stories: &[UserStory]) -> StoryRepositoryResult<()>;

    /// Returns the stories archived against a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoryRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn list_for_project(&self, project_id: ProjectId)
    -> StoryRepositoryResult<Vec<UserStory>>;
}

/// Errors returned by story repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StoryRepositoryError {
    /// The referenced project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
