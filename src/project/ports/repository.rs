//! Repository port for project and membership persistence.

use crate::identity::domain::UserId;
use crate::project::domain::{Membership, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project and membership persistence contract.
///
/// Membership is a set-valued relation owned by the project side:
/// duplicate checks, referential checks, and the project-deletion
/// cascade are single atomic units inside every implementation.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// project ID already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Deletes a project, cascading its memberships, tasks, and archived
    /// stories in the same atomic unit.
    ///
    /// Deletion is authoritative: membership or task inserts racing with
    /// it observe [`ProjectRepositoryError::NotFound`] rather than
    /// landing in a deleted project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Adds a user to a project's membership set.
    ///
    /// The existence checks, the duplicate check, and the insert are one
    /// atomic unit: two concurrent calls for the same pair produce
    /// exactly one success and one [`ProjectRepositoryError::AlreadyMember`].
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist, [`ProjectRepositoryError::UserNotFound`] when the user
    /// does not exist, or [`ProjectRepositoryError::AlreadyMember`] when
    /// the pair already exists.
    async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Membership>;

    /// Returns the membership set of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<UserId>>;

    /// Returns whether a user belongs to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn is_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The referenced user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The membership pair already exists.
    #[error("user {user} is already a member of project {project}")]
    AlreadyMember {
        /// Project side of the duplicate pair.
        project: ProjectId,
        /// User side of the duplicate pair.
        user: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
