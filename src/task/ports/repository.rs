//! Repository port for task persistence and lookup.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// Referential checks are part of the insert's atomic unit: the
    /// owning project must exist and a set assignee must currently be a
    /// member of it, revalidated inside the same critical section that
    /// performs the insert.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists, [`TaskRepositoryError::ProjectNotFound`] when the
    /// owning project is missing, or
    /// [`TaskRepositoryError::AssigneeNotMember`] when the assignee is
    /// not a current member of the project.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task. Nothing references a task, so there is no cascade.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns the number of tasks belonging to a project.
    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The assignee is not a member of the owning project.
    #[error("user {user} is not a member of project {project}")]
    AssigneeNotMember {
        /// Project the task was aimed at.
        project: ProjectId,
        /// Assignee that failed the membership check.
        user: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
