//! Task aggregate root.

use super::{TaskId, TaskStatus, TaskTitle};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task belongs to exactly one project for its whole life; neither the
/// project nor the assignee can be changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    project_id: ProjectId,
    assigned_to: Option<UserId>,
    created_by: UserId,
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Project the task belongs to.
    pub project_id: ProjectId,
    /// Optional assignee; must be a member of the project.
    pub assigned_to: Option<UserId>,
    /// Actor creating the task.
    pub created_by: UserId,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted assignee reference, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with status [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            deadline: data.deadline,
            status: TaskStatus::Todo,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            deadline: data.deadline,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning project reference.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Writes the workflow status.
    ///
    /// A direct assignment over the closed enumeration: any status may be
    /// set from any status, including leaving [`TaskStatus::Done`].
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Returns whether the task is overdue at the given instant.
    ///
    /// True iff a deadline is set, `now` is past it, and the task is not
    /// done. Completed tasks are never overdue regardless of deadline.
    /// Recomputed on every read; never stored.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.deadline.is_some_and(|deadline| now > deadline)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
