//! Closed enumeration of authorizable actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action requested by an actor against the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new project.
    CreateProject,
    /// Delete a project and cascade its relations.
    DeleteProject,
    /// Add a user to a project's membership set.
    AddMember,
    /// Create a task within a project.
    CreateTask,
    /// Write a task's status.
    UpdateTaskStatus,
    /// Delete a task.
    DeleteTask,
    /// Read the dashboard aggregation.
    ViewDashboard,
    /// Enumerate registered users.
    ListUsers,
}

impl Action {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::DeleteProject => "delete_project",
            Self::AddMember => "add_member",
            Self::CreateTask => "create_task",
            Self::UpdateTaskStatus => "update_task_status",
            Self::DeleteTask => "delete_task",
            Self::ViewDashboard => "view_dashboard",
            Self::ListUsers => "list_users",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
