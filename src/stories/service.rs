//! Service layer bridging the story generator and the archive.

use super::domain::{StoryDomainError, UserStory};
use super::ports::{StoryGenerator, StoryGeneratorError, StoryRepository, StoryRepositoryError};
use crate::project::domain::ProjectId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for story generation.
#[derive(Debug, Error)]
pub enum StoryServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] StoryDomainError),
    /// The external generator reported a failure, passed through
    /// unchanged.
    #[error(transparent)]
    Generator(#[from] StoryGeneratorError),
    /// Archival failed.
    #[error(transparent)]
    Repository(#[from] StoryRepositoryError),
}

/// Result type for story service operations.
pub type StoryServiceResult<T> = Result<T, StoryServiceError>;

/// Story generation orchestration service.
#[derive(Clone)]
pub struct StoryService<G, S, C>
where
    G: StoryGenerator,
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    generator: Arc<G>,
    archive: Arc<S>,
    clock: Arc<C>,
}

impl<G, S, C> StoryService<G, S, C>
where
    G: StoryGenerator,
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new story service.
    #[must_use]
    pub const fn new(generator: Arc<G>, archive: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            generator,
            archive,
            clock,
        }
    }

    /// Generates user stories from a project description.
    ///
    /// When a project ID is supplied, each generated line is archived
    /// against that project before the stories are returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoryServiceError::Domain`] when the description is
    /// empty, [`StoryServiceError::Generator`] when the external call
    /// fails, or [`StoryServiceError::Repository`] when the target
    /// project does not exist.
    pub async fn generate(
        &self,
        description: &str,
        project_id: Option<ProjectId>,
    ) -> StoryServiceResult<Vec<String>> {
        if description.trim().is_empty() {
            return Err(StoryDomainError::EmptyDescription.into());
        }

        let stories = self.generator.generate(description).await?;

        if let Some(project_id) = project_id {
            let records: Vec<UserStory> = stories
                .iter()
                .map(|story| UserStory::new(project_id, story.clone(), &*self.clock))
                .collect();
            self.archive.append(&records).await?;
            tracing::info!(project = %project_id, count = records.len(), "stories archived");
        }

        Ok(stories)
    }
}
