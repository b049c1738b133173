//! Read path feeding the dashboard reducer from the repositories.

use super::snapshot::DashboardSnapshot;
use crate::authz::{AccessDenied, Action, Actor, require};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for dashboard reads.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// The actor's role may not view the dashboard.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
}

/// Result type for dashboard service operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard read service.
///
/// Never mutates; runs concurrently with any number of writers and may
/// return a slightly stale snapshot.
#[derive(Clone)]
pub struct DashboardService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> DashboardService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            clock,
        }
    }

    /// Computes the dashboard aggregation over all projects and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Denied`] when the actor may not view the
    /// dashboard, or a repository error when a lookup fails.
    pub async fn snapshot(&self, actor: &Actor) -> DashboardResult<DashboardSnapshot> {
        require(actor, Action::ViewDashboard)?;

        let projects = self.projects.list_all().await?;
        let tasks = self.tasks.list_all().await?;
        Ok(DashboardSnapshot::compute(
            &projects,
            &tasks,
            self.clock.utc(),
        ))
    }
}
