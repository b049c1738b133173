//! `PostgreSQL` board store implementing all repository ports.

use super::{
    models::{
        NewMembershipRow, NewProjectRow, NewStoryRow, NewTaskRow, NewUserRow, ProjectRow,
        StoryRow, TaskRow, UserRow,
    },
    schema::{project_members, projects, tasks, user_stories, users},
};
use crate::identity::domain::{
    PasswordHash, PersistedUserData, Role, User, UserId, Username,
};
use crate::identity::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};
use crate::project::domain::{
    Membership, PersistedProjectData, Project, ProjectId, ProjectName,
};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use crate::stories::domain::{StoryId, UserStory};
use crate::stories::ports::{StoryRepository, StoryRepositoryError, StoryRepositoryResult};
use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the board store.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store.
///
/// Uniqueness and referential integrity are enforced by database
/// constraints; in-process pre-checks only improve error reporting and
/// are not relied on for correctness in the TOCTOU window between check
/// and insert.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

/// Internal adapter contract for wrapping infrastructure failures.
trait FromPersistence {
    /// Wraps an infrastructure error into the port's persistence variant.
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl FromPersistence for UserRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl FromPersistence for ProjectRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl FromPersistence for TaskRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl FromPersistence for StoryRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Builds a store with a fresh connection pool for the given database
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns the pool construction error when the database is
    /// unreachable or the URL is malformed.
    pub fn connect(database_url: &str) -> Result<Self, diesel::r2d2::PoolError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: FromPersistence + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresBoardStore {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let new_row = user_to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "users_username_key") =>
                    {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for PostgresBoardStore {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = project_to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            projects::table
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let project_uuid = id.into_inner();
        self.run_blocking(move |connection| {
            let result = connection.transaction::<_, DieselError, _>(|conn| {
                diesel::delete(
                    user_stories::table.filter(user_stories::project_id.eq(project_uuid)),
                )
                .execute(conn)?;
                diesel::delete(
                    project_members::table.filter(project_members::project_id.eq(project_uuid)),
                )
                .execute(conn)?;
                diesel::delete(tasks::table.filter(tasks::project_id.eq(project_uuid)))
                    .execute(conn)?;
                let deleted =
                    diesel::delete(projects::table.filter(projects::id.eq(project_uuid)))
                        .execute(conn)?;
                if deleted == 0 {
                    return Err(DieselError::NotFound);
                }
                Ok(())
            });

            match result {
                Ok(()) => Ok(()),
                Err(DieselError::NotFound) => Err(ProjectRepositoryError::NotFound(id)),
                Err(err) => Err(ProjectRepositoryError::persistence(err)),
            }
        })
        .await
    }

    async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<Membership> {
        let project_uuid = project_id.into_inner();
        let user_uuid = user_id.into_inner();

        self.run_blocking(move |connection| {
            let project_exists: bool = diesel::select(exists(
                projects::table.filter(projects::id.eq(project_uuid)),
            ))
            .get_result(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            if !project_exists {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }

            let user_exists: bool =
                diesel::select(exists(users::table.filter(users::id.eq(user_uuid))))
                    .get_result(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            if !user_exists {
                return Err(ProjectRepositoryError::UserNotFound(user_id));
            }

            let new_row = NewMembershipRow {
                project_id: project_uuid,
                user_id: user_uuid,
            };
            diesel::insert_into(project_members::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::AlreadyMember {
                            project: project_id,
                            user: user_id,
                        }
                    }
                    DieselError::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        ref info,
                    ) if is_constraint(info.as_ref(), "project_members_project_id_fkey") => {
                        ProjectRepositoryError::NotFound(project_id)
                    }
                    DieselError::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        ref info,
                    ) if is_constraint(info.as_ref(), "project_members_user_id_fkey") => {
                        ProjectRepositoryError::UserNotFound(user_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;

            Ok(Membership::new(project_id, user_id))
        })
        .await
    }

    async fn members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<UserId>> {
        let project_uuid = project_id.into_inner();
        self.run_blocking(move |connection| {
            let project_exists: bool = diesel::select(exists(
                projects::table.filter(projects::id.eq(project_uuid)),
            ))
            .get_result(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            if !project_exists {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }

            let member_ids = project_members::table
                .filter(project_members::project_id.eq(project_uuid))
                .order(project_members::user_id.asc())
                .select(project_members::user_id)
                .load::<uuid::Uuid>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(member_ids.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }

    async fn is_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        let project_uuid = project_id.into_inner();
        let user_uuid = user_id.into_inner();
        self.run_blocking(move |connection| {
            let project_exists: bool = diesel::select(exists(
                projects::table.filter(projects::id.eq(project_uuid)),
            ))
            .get_result(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            if !project_exists {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }

            diesel::select(exists(
                project_members::table
                    .filter(project_members::project_id.eq(project_uuid))
                    .filter(project_members::user_id.eq(user_uuid)),
            ))
            .get_result(connection)
            .map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let assignee = task.assigned_to();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            let project_exists: bool = diesel::select(exists(
                projects::table.filter(projects::id.eq(project_id.into_inner())),
            ))
            .get_result(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if !project_exists {
                return Err(TaskRepositoryError::ProjectNotFound(project_id));
            }

            if let Some(user_id) = assignee {
                let is_member: bool = diesel::select(exists(
                    project_members::table
                        .filter(project_members::project_id.eq(project_id.into_inner()))
                        .filter(project_members::user_id.eq(user_id.into_inner())),
                ))
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
                if !is_member {
                    return Err(TaskRepositoryError::AssigneeNotMember {
                        project: project_id,
                        user: user_id,
                    });
                }
            }

            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        ref info,
                    ) if is_constraint(info.as_ref(), "tasks_project_id_fkey") => {
                        TaskRepositoryError::ProjectNotFound(project_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let status = task.status().as_str().to_owned();
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((tasks::status.eq(&status), tasks::updated_at.eq(updated_at)))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            usize::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl StoryRepository for PostgresBoardStore {
    async fn append(&self, stories: &[UserStory]) -> StoryRepositoryResult<()> {
        let new_rows: Vec<NewStoryRow> = stories.iter().map(story_to_new_row).collect();
        let mut project_ids: Vec<ProjectId> =
            stories.iter().map(|story| story.project_id).collect();
        project_ids.sort_unstable_by_key(|id| id.into_inner());
        project_ids.dedup();

        self.run_blocking(move |connection| {
            for project_id in project_ids {
                let project_exists: bool = diesel::select(exists(
                    projects::table.filter(projects::id.eq(project_id.into_inner())),
                ))
                .get_result(connection)
                .map_err(StoryRepositoryError::persistence)?;
                if !project_exists {
                    return Err(StoryRepositoryError::ProjectNotFound(project_id));
                }
            }

            diesel::insert_into(user_stories::table)
                .values(&new_rows)
                .execute(connection)
                .map_err(StoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> StoryRepositoryResult<Vec<UserStory>> {
        let project_uuid = project_id.into_inner();
        self.run_blocking(move |connection| {
            let project_exists: bool = diesel::select(exists(
                projects::table.filter(projects::id.eq(project_uuid)),
            ))
            .get_result(connection)
            .map_err(StoryRepositoryError::persistence)?;
            if !project_exists {
                return Err(StoryRepositoryError::ProjectNotFound(project_id));
            }

            let rows = user_stories::table
                .filter(user_stories::project_id.eq(project_uuid))
                .order(user_stories::created_at.asc())
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)
                .map_err(StoryRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_story).collect())
        })
        .await
    }
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|found| found == name)
}

fn user_to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        credential: user.credential().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let username = Username::new(row.username).map_err(UserRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        username,
        credential: PasswordHash::new(row.credential),
        role,
        created_at: row.created_at,
    }))
}

fn project_to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        status: project.status().to_owned(),
        created_by: project.created_by().into_inner(),
        created_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(ProjectRepositoryError::persistence)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name,
        description: row.description,
        status: row.status,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
    }))
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        project_id: task.project_id().into_inner(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        deadline: task.deadline(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description: row.description,
        project_id: ProjectId::from_uuid(row.project_id),
        assigned_to: row.assigned_to.map(UserId::from_uuid),
        created_by: UserId::from_uuid(row.created_by),
        deadline: row.deadline,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn story_to_new_row(story: &UserStory) -> NewStoryRow {
    NewStoryRow {
        id: story.id.into_inner(),
        project_id: story.project_id.into_inner(),
        story: story.story.clone(),
        created_at: story.created_at,
    }
}

fn row_to_story(row: StoryRow) -> UserStory {
    UserStory {
        id: StoryId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        story: row.story,
        created_at: row.created_at,
    }
}
