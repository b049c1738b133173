//! Integration tests for staffing rules and the deletion cascade.

use super::helpers::{actor, app, assert_single_member, register};
use rstest::rstest;
use taskboard::identity::domain::Role;
use taskboard::project::ports::ProjectRepositoryError;
use taskboard::project::services::{CreateProjectRequest, ProjectRegistryError};
use taskboard::task::ports::TaskRepository;
use taskboard::task::services::CreateTaskRequest;

#[rstest]
#[case(Role::Developer)]
#[tokio::test(flavor = "multi_thread")]
async fn non_privileged_staffing_is_rejected_and_set_unchanged(#[case] role: Role) {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let restricted = register(&app, "restricted", role).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");

    let result = app
        .projects
        .add_member(&actor(&restricted), project.id(), restricted.id())
        .await;

    assert!(matches!(result, Err(ProjectRegistryError::Denied(_))));
    let members = app
        .projects
        .list_members(project.id())
        .await
        .expect("listing should succeed");
    assert!(members.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_enrollment_reports_already_member() -> eyre::Result<()> {
    let app = app();
    let manager = register(&app, "manager", Role::Manager).await;
    let bob = register(&app, "bob", Role::Developer).await;
    let project = app
        .projects
        .create_project(&actor(&manager), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");

    app.projects
        .add_member(&actor(&manager), project.id(), bob.id())
        .await
        .expect("first enrollment should succeed");
    let second = app
        .projects
        .add_member(&actor(&manager), project.id(), bob.id())
        .await;

    assert!(matches!(
        second,
        Err(ProjectRegistryError::Repository(
            ProjectRepositoryError::AlreadyMember { .. }
        ))
    ));
    let members = app
        .projects
        .list_members(project.id())
        .await
        .expect("listing should succeed");
    assert_single_member(&members, "bob")?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_duplicate_enrollment_resolves_to_one_success() {
    let app = app();
    let manager = register(&app, "manager", Role::Manager).await;
    let bob = register(&app, "bob", Role::Developer).await;
    let project = app
        .projects
        .create_project(&actor(&manager), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    let staffing_actor = actor(&manager);

    let (first, second) = tokio::join!(
        app.projects
            .add_member(&staffing_actor, project.id(), bob.id()),
        app.projects
            .add_member(&staffing_actor, project.id(), bob.id()),
    );

    let successes = usize::from(first.is_ok()) + usize::from(second.is_ok());
    assert_eq!(successes, 1);
    let members = app
        .projects
        .list_members(project.id())
        .await
        .expect("listing should succeed");
    assert_eq!(members.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_memberships_and_tasks() {
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
    app.tasks
        .create_task(
            &actor(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(bob.id()),
        )
        .await
        .expect("task creation should succeed");

    app.projects
        .delete_project(&actor(&admin), project.id())
        .await
        .expect("deletion should succeed");

    let members = app.projects.list_members(project.id()).await;
    assert!(matches!(
        members,
        Err(ProjectRegistryError::Repository(
            ProjectRepositoryError::NotFound(_)
        ))
    ));
    let remaining = TaskRepository::list_all(&*app.store)
        .await
        .expect("listing should succeed");
    assert!(remaining.iter().all(|task| task.project_id() != project.id()));
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enrollment_racing_a_deletion_never_lands_in_a_deleted_project() {
    let app = app();
    let admin = register(&app, "admin", Role::Admin).await;
    let bob = register(&app, "bob", Role::Developer).await;
    let project = app
        .projects
        .create_project(&actor(&admin), CreateProjectRequest::new("Alpha"))
        .await
        .expect("project creation should succeed");
    let admin_actor = actor(&admin);

    let (deleted, enrolled) = tokio::join!(
        app.projects.delete_project(&admin_actor, project.id()),
        app.projects
            .add_member(&admin_actor, project.id(), bob.id()),
    );

    deleted.expect("deletion should succeed");
    if enrolled.is_ok() {
        // The insert won the race; the cascade must still have removed it.
        assert!(app.projects.list_members(project.id()).await.is_err());
    } else {
        assert!(matches!(
            enrolled,
            Err(ProjectRegistryError::Repository(
                ProjectRepositoryError::NotFound(_)
            ))
        ));
    }
}
