//! Integration tests for the task workflow.

use super::helpers::{actor, app, register};
use rstest::rstest;
use taskboard::identity::domain::Role;
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::domain::TaskStatus;
use taskboard::task::ports::TaskRepositoryError;
use taskboard::task::services::{CreateTaskRequest, TaskWorkflowError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_and_assigned_creation_paths_both_work() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let bob = register(&app, "bob", Role::Developer).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    app.projects
        .add_member(&actor(&admin), project.id(), bob.id())
        .await
        .expect("enrollment should succeed");

    let unassigned = app
        .tasks
        .create_task(&actor(&admin), CreateTaskRequest::new("Write docs", project.id()))
        .await
        .expect("unassigned creation should succeed");
    let assigned = app
        .tasks
        .create_task(
            &actor(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(bob.id()),
        )
        .await
        .expect("assigned creation should succeed");

    assert_eq!(unassigned.assigned_to(), None);
    assert_eq!(assigned.assigned_to(), Some(bob.id()));
    assert_eq!(unassigned.status(), TaskStatus::Todo);
    assert_eq!(assigned.status(), TaskStatus::Todo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_member_assignee_fails_and_nothing_is_persisted() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let outsider = register(&app, "outsider", Role::Developer).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");

    let result = app
        .tasks
        .create_task(
            &actor(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(outsider.id()),
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Repository(
            TaskRepositoryError::AssigneeNotMember { .. }
        ))
    ));
    let views = app.tasks.list_tasks().await.expect("listing should succeed");
    assert!(views.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exposed_workflow_transitions_and_reopening_done_all_apply() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    let admin_actor = actor(&admin);
    let task = app
        .tasks
        .create_task(&admin_actor, CreateTaskRequest::new("Fix bug", project.id()))
        .await
        .expect("task creation should succeed");

    for status in [
        TaskStatus::InProgress,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Todo,
    ] {
        let updated = app
            .tasks
            .update_status(&admin_actor, task.id(), status)
            .await
            .expect("status write should succeed");
        assert_eq!(updated.status(), status);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_tasks_disappear_from_the_listing() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    let task = app
        .tasks
        .create_task(
            &actor(&admin),
            CreateTaskRequest::new("Fix bug", project.id()),
        )
        .await
        .expect("task creation should succeed");

    app.tasks
        .delete_task(&actor(&admin), task.id())
        .await
        .expect("deletion should succeed");

    let views = app.tasks.list_tasks().await.expect("listing should succeed");
    assert!(views.is_empty());
    let gone = app
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none());
}
