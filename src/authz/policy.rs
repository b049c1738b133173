//! Role-based authorization table and resource-scoped refinements.

use super::{Action, Actor};
use crate::identity::domain::{Role, UserId};
use thiserror::Error;

/// Terminal authorization rejection.
///
/// A denial never retries and never partially applies a mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("role {role} may not {action}")]
pub struct AccessDenied {
    /// Role carried by the rejected actor.
    pub role: Role,
    /// Action the actor attempted.
    pub action: Action,
}

/// Returns whether a role may perform an action, from the single
/// role × action allow table.
///
/// Admins and managers may perform every action. Developers may create
/// projects and tasks, write task status, delete tasks, and view the
/// dashboard; they may not manage membership, delete projects, or
/// enumerate users. Resource-scoped developer restrictions on task
/// mutations are layered on by [`allows_task_mutation`].
#[must_use]
pub const fn allows(role: Role, action: Action) -> bool {
    match role {
        Role::Admin | Role::Manager => true,
        Role::Developer => matches!(
            action,
            Action::CreateProject
                | Action::CreateTask
                | Action::UpdateTaskStatus
                | Action::DeleteTask
                | Action::ViewDashboard
        ),
    }
}

/// Checks the allow table and produces a terminal rejection on denial.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the actor's role may not perform the
/// action.
pub const fn require(actor: &Actor, action: Action) -> Result<(), AccessDenied> {
    if allows(actor.role, action) {
        Ok(())
    } else {
        Err(AccessDenied {
            role: actor.role,
            action,
        })
    }
}

/// Resource context for developer-scoped task mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskScope {
    /// User who created the task.
    pub created_by: UserId,
    /// Current assignee, if any.
    pub assignee: Option<UserId>,
    /// Whether the acting user is a member of the task's project.
    pub actor_is_member: bool,
}

/// Checks a task mutation against the allow table and the developer
/// resource scope.
///
/// Developers may write status only on tasks assigned to them or within
/// projects they belong to, and may delete only tasks they created.
/// Admins and managers are unscoped.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the role table or the developer scope
/// rejects the mutation.
pub fn require_task_mutation(
    actor: &Actor,
    action: Action,
    scope: &TaskScope,
) -> Result<(), AccessDenied> {
    require(actor, action)?;

    if actor.role != Role::Developer {
        return Ok(());
    }

    let permitted = match action {
        Action::UpdateTaskStatus => scope.assignee == Some(actor.id) || scope.actor_is_member,
        Action::DeleteTask => scope.created_by == actor.id,
        _ => true,
    };

    if permitted {
        Ok(())
    } else {
        Err(AccessDenied {
            role: actor.role,
            action,
        })
    }
}
