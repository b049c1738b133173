//! Integration tests for dashboard aggregation.

use super::helpers::{actor, app, register};
use chrono::{Duration, Utc};
use rstest::rstest;
use taskboard::identity::domain::Role;
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::domain::TaskStatus;
use taskboard::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_board_produces_all_zero_stats() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;

    let snapshot = app
        .dashboard
        .snapshot(&actor(&admin))
        .await
        .expect("dashboard read should succeed");

    assert_eq!(snapshot.stats.total_projects, 0);
    assert_eq!(snapshot.stats.total_tasks, 0);
    assert_eq!(snapshot.stats.overdue, 0);
    assert!(snapshot.recent_tasks.is_empty());
    assert!(snapshot.overdue_tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_flips_buckets_when_completed() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let bob = register(&app, "bob", Role::Developer).await;
    let admin_actor = actor(&admin);
    let project = app
        .projects
        .create_project(&admin_actor, CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    app.projects
        .add_member(&admin_actor, project.id(), bob.id())
        .await
        .expect("enrollment should succeed");
    let yesterday = Utc::now() - Duration::days(1);
    let task = app
        .tasks
        .create_task(
            &admin_actor,
            CreateTaskRequest::new("Fix bug", project.id())
                .with_assignee(bob.id())
                .with_deadline(yesterday),
        )
        .await
        .expect("task creation should succeed");

    let before = app
        .dashboard
        .snapshot(&admin_actor)
        .await
        .expect("dashboard read should succeed");
    assert_eq!(before.stats.total_projects, 1);
    assert_eq!(before.stats.total_tasks, 1);
    assert_eq!(before.stats.todo, 1);
    assert_eq!(before.stats.done, 0);
    assert_eq!(before.stats.overdue, 1);
    let recent = before.recent_tasks.first().expect("one recent entry");
    assert_eq!(recent.project.as_deref(), Some("Alpha"));

    app.tasks
        .update_status(&admin_actor, task.id(), TaskStatus::Done)
        .await
        .expect("status write should succeed");

    let after = app
        .dashboard
        .snapshot(&admin_actor)
        .await
        .expect("dashboard read should succeed");
    assert_eq!(after.stats.todo, 0);
    assert_eq!(after.stats.done, 1);
    assert_eq!(after.stats.overdue, 0);
    assert!(after.overdue_tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_counts_span_all_projects_for_every_role() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let dev = register(&app, "dev", Role::Developer).await;
    let admin_actor = actor(&admin);
    for name in ["Alpha", "Beta"] {
        let project = app
            .projects
            .create_project(&admin_actor, CreateProjectRequest::new(name))
            .await
            .expect("project creation should succeed");
        app.tasks
            .create_task(&admin_actor, CreateTaskRequest::new("Task", project.id()))
            .await
            .expect("task creation should succeed");
    }

    let seen_by_dev = app
        .dashboard
        .snapshot(&actor(&dev))
        .await
        .expect("developer dashboard read should succeed");

    assert_eq!(seen_by_dev.stats.total_projects, 2);
    assert_eq!(seen_by_dev.stats.total_tasks, 2);
}
