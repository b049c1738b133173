//! Service layer for project creation, staffing, and enumeration.

use crate::authz::{AccessDenied, Action, Actor, require};
use crate::identity::domain::{UserId, UserProfile};
use crate::identity::ports::{UserRepository, UserRepositoryError};
use crate::project::{
    domain::{Membership, Project, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Listing row for a project, including staffing and workload counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Descriptive status value.
    pub status: String,
    /// Number of tasks in the project.
    pub task_count: usize,
    /// Current membership set, sorted by username.
    pub team_members: Vec<UserProfile>,
}

/// Service-level errors for project registry operations.
#[derive(Debug, Error)]
pub enum ProjectRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// The actor's role may not perform the operation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
}

/// Result type for project registry service operations.
pub type ProjectRegistryResult<T> = Result<T, ProjectRegistryError>;

/// Project and membership orchestration service.
#[derive(Clone)]
pub struct ProjectRegistryService<P, T, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, T, U, C> ProjectRegistryService<P, T, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project registry service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            users,
            clock,
        }
    }

    /// Creates a new project on behalf of the actor.
    ///
    /// Every role may create projects. The creator is recorded on the
    /// aggregate but is not enrolled as a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Domain`] when the name fails
    /// validation, or [`ProjectRegistryError::Repository`] when
    /// persistence rejects the insert.
    pub async fn create_project(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectRegistryResult<Project> {
        require(actor, Action::CreateProject)?;

        let CreateProjectRequest { name, description } = request;
        let project_name = ProjectName::new(name)?;
        let project = Project::new(project_name, description, actor.id, &*self.clock);
        self.projects.store(&project).await?;
        tracing::info!(project = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Deletes a project, cascading its memberships, tasks, and archived
    /// stories.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Denied`] unless the actor is an
    /// admin or manager, or [`ProjectRegistryError::Repository`] with
    /// [`ProjectRepositoryError::NotFound`] when the project is missing.
    pub async fn delete_project(
        &self,
        actor: &Actor,
        project_id: ProjectId,
    ) -> ProjectRegistryResult<()> {
        require(actor, Action::DeleteProject)?;

        self.projects.delete(project_id).await?;
        tracing::info!(project = %project_id, "project deleted");
        Ok(())
    }

    /// Adds a user to a project's membership set.
    ///
    /// Calling twice for the same pair is an error, not a no-op: the
    /// second call reports `AlreadyMember` and the set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Denied`] unless the actor is an
    /// admin or manager, or [`ProjectRegistryError::Repository`] when the
    /// project or user is missing or the pair already exists.
    pub async fn add_member(
        &self,
        actor: &Actor,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRegistryResult<Membership> {
        require(actor, Action::AddMember)?;

        let membership = self.projects.add_member(project_id, user_id).await?;
        tracing::info!(project = %project_id, user = %user_id, "member added");
        Ok(membership)
    }

    /// Returns the membership set of a project, sorted by username.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] with
    /// [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist (including after deletion), or
    /// [`ProjectRegistryError::Users`] when a member row references a
    /// user that cannot be resolved.
    pub async fn list_members(
        &self,
        project_id: ProjectId,
    ) -> ProjectRegistryResult<Vec<UserProfile>> {
        let member_ids = self.projects.members(project_id).await?;
        self.resolve_profiles(member_ids).await
    }

    /// Returns listing rows for all projects.
    ///
    /// The listing is unrestricted: every authenticated role sees every
    /// project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`],
    /// [`ProjectRegistryError::Tasks`], or
    /// [`ProjectRegistryError::Users`] when any lookup fails.
    pub async fn list_projects(&self) -> ProjectRegistryResult<Vec<ProjectSummary>> {
        let projects = self.projects.list_all().await?;
        let mut summaries = Vec::with_capacity(projects.len());

        for project in projects {
            let task_count = self.tasks.count_for_project(project.id()).await?;
            let member_ids = self.projects.members(project.id()).await?;
            let team_members = self.resolve_profiles(member_ids).await?;

            summaries.push(ProjectSummary {
                id: project.id(),
                name: project.name().as_str().to_owned(),
                description: project.description().map(str::to_owned),
                status: project.status().to_owned(),
                task_count,
                team_members,
            });
        }

        Ok(summaries)
    }

    /// Finds a project by identifier.
    ///
    /// Returns `Ok(None)` when no project has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.projects.find_by_id(id).await?)
    }

    /// Resolves member IDs to profiles, sorted by username.
    async fn resolve_profiles(
        &self,
        member_ids: Vec<UserId>,
    ) -> ProjectRegistryResult<Vec<UserProfile>> {
        let mut profiles = Vec::with_capacity(member_ids.len());
        for user_id in member_ids {
            let user = self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or(UserRepositoryError::NotFound(user_id))?;
            profiles.push(user.profile());
        }
        profiles.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(profiles)
    }
}
