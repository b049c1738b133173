//! Dashboard aggregation.
//!
//! A pull-based, read-only reducer over all projects and tasks:
//! aggregate counts, per-status buckets, an independent overdue count,
//! and bounded recent/overdue task lists. The reducer itself
//! ([`DashboardSnapshot::compute`]) is a pure function; the service
//! feeds it from the repositories.

mod service;
mod snapshot;

pub use service::{DashboardError, DashboardResult, DashboardService};
pub use snapshot::{
    DashboardSnapshot, DashboardStats, OVERDUE_TASK_LIMIT, OverdueTask, RECENT_TASK_LIMIT,
    RecentTask,
};
