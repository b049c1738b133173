//! Service layer for task creation, status writes, deletion, and listing.

use crate::authz::{AccessDenied, Action, Actor, TaskScope, require, require_task_mutation};
use crate::identity::domain::UserId;
use crate::identity::ports::{UserRepository, UserRepositoryError};
use crate::project::domain::ProjectId;
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::task::{
    domain::{NewTaskData, Task, TaskDomainError, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    project_id: ProjectId,
    assigned_to: Option<UserId>,
    deadline: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            title: title.into(),
            description: None,
            project_id,
            assigned_to: None,
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee; membership is revalidated at insert time.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Listing row for a task, annotated with names and the computed overdue
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Owning project reference.
    pub project_id: ProjectId,
    /// Owning project name, when resolvable.
    pub project_name: Option<String>,
    /// Assignee reference, if any.
    pub assigned_to: Option<UserId>,
    /// Assignee username, when resolvable.
    pub assignee_name: Option<String>,
    /// Deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Whether the task was overdue at listing time.
    pub overdue: bool,
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The actor may not perform the mutation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<T, P, U, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, P, U, C> TaskWorkflowService<T, P, U, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            users,
            clock,
        }
    }

    /// Creates a task within a project, with status
    /// [`TaskStatus::Todo`].
    ///
    /// A supplied assignee must currently be a member of the project;
    /// the check is revalidated inside the repository's atomic insert,
    /// so client-side filtering of the assignee picker is advisory only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the title fails
    /// validation, or [`TaskWorkflowError::Repository`] with
    /// [`TaskRepositoryError::ProjectNotFound`] or
    /// [`TaskRepositoryError::AssigneeNotMember`] when referential checks
    /// fail. No task is persisted on any failure.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        require(actor, Action::CreateTask)?;

        let CreateTaskRequest {
            title,
            description,
            project_id,
            assigned_to,
            deadline,
        } = request;

        let task_title = TaskTitle::new(title)?;
        let task = Task::new(
            NewTaskData {
                title: task_title,
                description,
                project_id,
                assigned_to,
                created_by: actor.id,
                deadline,
            },
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        tracing::info!(task = %task.id(), project = %project_id, "task created");
        Ok(task)
    }

    /// Writes a task's status.
    ///
    /// The write is a free assignment over the closed status
    /// enumeration; any status may be set from any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task is missing, or
    /// [`TaskWorkflowError::Denied`] when the actor is a developer
    /// outside the task's scope.
    pub async fn update_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let scope = self.task_scope(actor, &task).await?;
        require_task_mutation(actor, Action::UpdateTaskStatus, &scope)?;

        let previous = task.status();
        task.set_status(status, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task = %task_id, from = %previous, to = %status, "task status updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task is missing, or
    /// [`TaskWorkflowError::Denied`] when the actor is a developer who
    /// did not create the task.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<()> {
        let task = self.find_task_or_error(task_id).await?;
        let scope = self.task_scope(actor, &task).await?;
        require_task_mutation(actor, Action::DeleteTask, &scope)?;

        self.tasks.delete(task_id).await?;
        tracing::info!(task = %task_id, "task deleted");
        Ok(())
    }

    /// Returns listing rows for all tasks, annotated with project and
    /// assignee names and the overdue flag computed at call time.
    ///
    /// The listing is unrestricted: every authenticated role sees every
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`],
    /// [`TaskWorkflowError::Projects`], or [`TaskWorkflowError::Users`]
    /// when any lookup fails.
    pub async fn list_tasks(&self) -> TaskWorkflowResult<Vec<TaskView>> {
        let tasks = self.tasks.list_all().await?;
        let now = self.clock.utc();

        let project_names: HashMap<ProjectId, String> = self
            .projects
            .list_all()
            .await?
            .into_iter()
            .map(|project| (project.id(), project.name().as_str().to_owned()))
            .collect();

        let mut assignee_names: HashMap<UserId, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(tasks.len());

        for task in tasks {
            let assignee_name = match task.assigned_to() {
                Some(user_id) => self.assignee_name(&mut assignee_names, user_id).await?,
                None => None,
            };

            views.push(TaskView {
                id: task.id(),
                title: task.title().as_str().to_owned(),
                status: task.status(),
                project_id: task.project_id(),
                project_name: project_names.get(&task.project_id()).cloned(),
                assigned_to: task.assigned_to(),
                assignee_name,
                deadline: task.deadline(),
                overdue: task.is_overdue(now),
            });
        }

        Ok(views)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(task_id).into())
    }

    /// Builds the resource scope for developer-restricted mutations.
    async fn task_scope(&self, actor: &Actor, task: &Task) -> TaskWorkflowResult<TaskScope> {
        let actor_is_member = self.projects.is_member(task.project_id(), actor.id).await?;
        Ok(TaskScope {
            created_by: task.created_by(),
            assignee: task.assigned_to(),
            actor_is_member,
        })
    }

    /// Resolves and memoizes an assignee's username.
    async fn assignee_name(
        &self,
        cache: &mut HashMap<UserId, Option<String>>,
        user_id: UserId,
    ) -> TaskWorkflowResult<Option<String>> {
        if let Some(name) = cache.get(&user_id) {
            return Ok(name.clone());
        }

        let name = self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.username().as_str().to_owned());
        cache.insert(user_id, name.clone());
        Ok(name)
    }
}
