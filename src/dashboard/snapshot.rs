//! Pure dashboard aggregation over projects and tasks.

use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Maximum number of entries in the recent-tasks list.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Maximum number of entries in the overdue-tasks list.
pub const OVERDUE_TASK_LIMIT: usize = 5;

/// Aggregate counts across all projects and tasks.
///
/// The overdue count is independent of and additive to the status
/// buckets: a task can be both `in_progress` and overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    /// Number of projects.
    pub total_projects: usize,
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of tasks with status `todo`.
    pub todo: usize,
    /// Number of tasks with status `in_progress`.
    pub in_progress: usize,
    /// Number of tasks with status `done`.
    pub done: usize,
    /// Number of overdue tasks.
    pub overdue: usize,
}

/// Recently created task annotated with its project's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Owning project name, when resolvable.
    pub project: Option<String>,
    /// Deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
}

/// Overdue task annotated with its project's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Owning project name, when resolvable.
    pub project: Option<String>,
    /// Deadline that has passed.
    pub deadline: Option<DateTime<Utc>>,
}

/// Read-only dashboard aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    /// Aggregate counts.
    pub stats: DashboardStats,
    /// Most recently created tasks, newest first, capped at
    /// [`RECENT_TASK_LIMIT`].
    pub recent_tasks: Vec<RecentTask>,
    /// Overdue tasks, capped at [`OVERDUE_TASK_LIMIT`].
    pub overdue_tasks: Vec<OverdueTask>,
}

impl DashboardSnapshot {
    /// Reduces projects and tasks into dashboard statistics at the given
    /// instant.
    ///
    /// Pure and side-effect free; empty input produces all-zero counts
    /// and empty lists.
    #[must_use]
    pub fn compute(projects: &[Project], tasks: &[Task], now: DateTime<Utc>) -> Self {
        let project_names: HashMap<ProjectId, &str> = projects
            .iter()
            .map(|project| (project.id(), project.name().as_str()))
            .collect();
        let project_name =
            |task: &Task| project_names.get(&task.project_id()).map(|&name| name.to_owned());

        let mut stats = DashboardStats {
            total_projects: projects.len(),
            total_tasks: tasks.len(),
            ..DashboardStats::default()
        };

        let mut overdue_tasks = Vec::new();
        for task in tasks {
            match task.status() {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
                if overdue_tasks.len() < OVERDUE_TASK_LIMIT {
                    overdue_tasks.push(OverdueTask {
                        id: task.id(),
                        title: task.title().as_str().to_owned(),
                        project: project_name(task),
                        deadline: task.deadline(),
                    });
                }
            }
        }

        let mut by_recency: Vec<&Task> = tasks.iter().collect();
        by_recency.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let recent_tasks = by_recency
            .into_iter()
            .take(RECENT_TASK_LIMIT)
            .map(|task| RecentTask {
                id: task.id(),
                title: task.title().as_str().to_owned(),
                status: task.status(),
                project: project_name(task),
                deadline: task.deadline(),
            })
            .collect();

        Self {
            stats,
            recent_tasks,
            overdue_tasks,
        }
    }
}
