//! In-memory board store for tests and single-process use.
//!
//! One store holds every relation — users, projects, memberships, tasks,
//! and archived stories — behind a single [`RwLock`], so referential
//! checks, duplicate checks, and the project-deletion cascade each run
//! inside one critical section. This is what makes concurrent duplicate
//! `add_member` calls resolve to exactly one success, and membership
//! inserts racing a project deletion observe `NotFound` instead of
//! landing in a deleted project.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::identity::domain::{User, UserId, Username};
use crate::identity::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};
use crate::project::domain::{Membership, Project, ProjectId};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use crate::stories::domain::UserStory;
use crate::stories::ports::{StoryRepository, StoryRepositoryError, StoryRepositoryResult};
use crate::task::domain::{Task, TaskId};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Thread-safe in-memory store implementing all repository ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<BoardState>>,
}

#[derive(Debug, Default)]
struct BoardState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    projects: HashMap<ProjectId, Project>,
    memberships: HashMap<ProjectId, HashSet<UserId>>,
    tasks: HashMap<TaskId, Task>,
    stories: HashMap<ProjectId, Vec<UserStory>>,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryBoardStore {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.values().cloned().collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryBoardStore {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        state.memberships.entry(project.id()).or_default();
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.projects.remove(&id).is_none() {
            return Err(ProjectRepositoryError::NotFound(id));
        }

        state.memberships.remove(&id);
        state.tasks.retain(|_, task| task.project_id() != id);
        state.stories.remove(&id);
        Ok(())
    }

    async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Membership> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.projects.contains_key(&project_id) {
            return Err(ProjectRepositoryError::NotFound(project_id));
        }
        if !state.users.contains_key(&user_id) {
            return Err(ProjectRepositoryError::UserNotFound(user_id));
        }

        let members = state.memberships.entry(project_id).or_default();
        if !members.insert(user_id) {
            return Err(ProjectRepositoryError::AlreadyMember {
                project: project_id,
                user: user_id,
            });
        }

        Ok(Membership::new(project_id, user_id))
    }

    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.projects.contains_key(&project_id) {
            return Err(ProjectRepositoryError::NotFound(project_id));
        }

        let mut member_ids: Vec<UserId> = state
            .memberships
            .get(&project_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default();
        member_ids.sort_unstable();
        Ok(member_ids)
    }

    async fn is_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.projects.contains_key(&project_id) {
            return Err(ProjectRepositoryError::NotFound(project_id));
        }

        Ok(state
            .memberships
            .get(&project_id)
            .is_some_and(|members| members.contains(&user_id)))
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::ProjectNotFound(task.project_id()));
        }
        if let Some(assignee) = task.assigned_to() {
            let is_member = state
                .memberships
                .get(&task.project_id())
                .is_some_and(|members| members.contains(&assignee));
            if !is_member {
                return Err(TaskRepositoryError::AssigneeNotMember {
                    project: task.project_id(),
                    user: assignee,
                });
            }
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .count())
    }
}

#[async_trait]
impl StoryRepository for InMemoryBoardStore {
    async fn append(&self, stories: &[UserStory]) -> StoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            StoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        for story in stories {
            if !state.projects.contains_key(&story.project_id) {
                return Err(StoryRepositoryError::ProjectNotFound(story.project_id));
            }
        }
        for story in stories {
            state
                .stories
                .entry(story.project_id)
                .or_default()
                .push(story.clone());
        }
        Ok(())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> StoryRepositoryResult<Vec<UserStory>> {
        let state = self.state.read().map_err(|err| {
            StoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.projects.contains_key(&project_id) {
            return Err(StoryRepositoryError::ProjectNotFound(project_id));
        }

        Ok(state.stories.get(&project_id).cloned().unwrap_or_default())
    }
}
