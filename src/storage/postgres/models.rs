//! Diesel row models for board persistence.

use super::schema::{project_members, projects, tasks, user_stories, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// Opaque encoded credential.
    pub credential: String,
    /// Assigned role.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// Opaque encoded credential.
    pub credential: String,
    /// Assigned role.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Descriptive status value.
    pub status: String,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Descriptive status value.
    pub status: String,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for membership pairs.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = project_members)]
pub struct NewMembershipRow {
    /// Project side of the pair.
    pub project_id: uuid::Uuid,
    /// User side of the pair.
    pub user_id: uuid::Uuid,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning project reference.
    pub project_id: uuid::Uuid,
    /// Optional assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Workflow status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning project reference.
    pub project_id: uuid::Uuid,
    /// Optional assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Workflow status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for archived story records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoryRow {
    /// Story identifier.
    pub id: uuid::Uuid,
    /// Owning project reference.
    pub project_id: uuid::Uuid,
    /// Story text.
    pub story: String,
    /// Archival timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for archived story records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_stories)]
pub struct NewStoryRow {
    /// Story identifier.
    pub id: uuid::Uuid,
    /// Owning project reference.
    pub project_id: uuid::Uuid,
    /// Story text.
    pub story: String,
    /// Archival timestamp.
    pub created_at: DateTime<Utc>,
}
