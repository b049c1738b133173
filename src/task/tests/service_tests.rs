//! Service orchestration tests for the task workflow.

use std::sync::Arc;

use crate::authz::Actor;
use crate::identity::domain::{PasswordHash, Role, User, Username};
use crate::identity::ports::UserRepository;
use crate::project::domain::{Project, ProjectId, ProjectName};
use crate::project::ports::ProjectRepository;
use crate::storage::InMemoryBoardStore;
use crate::task::{
    domain::{TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskWorkflowError, TaskWorkflowService},
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    TaskWorkflowService<InMemoryBoardStore, InMemoryBoardStore, InMemoryBoardStore, DefaultClock>;

struct Harness {
    store: Arc<InMemoryBoardStore>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryBoardStore::new());
    let service = TaskWorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );
    Harness { store, service }
}

async fn seed_user(store: &InMemoryBoardStore, username: &str, role: Role) -> User {
    let user = User::new(
        Username::new(username).expect("valid username"),
        PasswordHash::new("salt$digest"),
        role,
        &DefaultClock,
    );
    UserRepository::store(store, &user)
        .await
        .expect("user seed should succeed");
    user
}

async fn seed_project(store: &InMemoryBoardStore, name: &str, creator: &User) -> Project {
    let project = Project::new(
        ProjectName::new(name).expect("valid project name"),
        None,
        creator.id(),
        &DefaultClock,
    );
    ProjectRepository::store(store, &project)
        .await
        .expect("project seed should succeed");
    project
}

async fn enroll(store: &InMemoryBoardStore, project: &Project, user: &User) {
    store
        .add_member(project.id(), user.id())
        .await
        .expect("membership seed should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_starts_in_todo_and_is_persisted(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;

    let task = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Fix bug", project.id()),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.created_by(), admin.id());
    let fetched = harness
        .service
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_rejects_missing_project(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;

    let result = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Orphan", ProjectId::new()),
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Repository(
            TaskRepositoryError::ProjectNotFound(_)
        ))
    ));
    let remaining = TaskRepository::list_all(&*harness.store)
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_rejects_non_member_assignee_without_persisting(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let outsider = seed_user(&harness.store, "outsider", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;

    let result = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(outsider.id()),
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Repository(
            TaskRepositoryError::AssigneeNotMember { .. }
        ))
    ));
    let remaining = TaskRepository::list_all(&*harness.store)
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_accepts_member_assignee(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let member = seed_user(&harness.store, "bob", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    enroll(&harness.store, &project, &member).await;

    let task = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(member.id()),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(task.assigned_to(), Some(member.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_can_leave_done(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    let actor = Actor::from(&admin);
    let task = harness
        .service
        .create_task(&actor, CreateTaskRequest::new("Fix bug", project.id()))
        .await
        .expect("task creation should succeed");

    harness
        .service
        .update_status(&actor, task.id(), TaskStatus::Done)
        .await
        .expect("status write should succeed");
    let reopened = harness
        .service
        .update_status(&actor, task.id(), TaskStatus::Todo)
        .await
        .expect("leaving done should be permitted");

    assert_eq!(reopened.status(), TaskStatus::Todo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_rejects_missing_task(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;

    let result = harness
        .service
        .update_status(&Actor::from(&admin), TaskId::new(), TaskStatus::Done)
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Repository(TaskRepositoryError::NotFound(
            _
        )))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developer_updates_status_of_assigned_task(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let member = seed_user(&harness.store, "bob", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    enroll(&harness.store, &project, &member).await;
    let task = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Fix bug", project.id()).with_assignee(member.id()),
        )
        .await
        .expect("task creation should succeed");

    let updated = harness
        .service
        .update_status(&Actor::from(&member), task.id(), TaskStatus::InProgress)
        .await
        .expect("assignee status write should succeed");

    assert_eq!(updated.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developer_may_not_touch_unrelated_tasks(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let stranger = seed_user(&harness.store, "stranger", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    let task = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Fix bug", project.id()),
        )
        .await
        .expect("task creation should succeed");

    let update = harness
        .service
        .update_status(&Actor::from(&stranger), task.id(), TaskStatus::Done)
        .await;
    assert!(matches!(update, Err(TaskWorkflowError::Denied(_))));

    let delete = harness
        .service
        .delete_task(&Actor::from(&stranger), task.id())
        .await;
    assert!(matches!(delete, Err(TaskWorkflowError::Denied(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developer_deletes_only_tasks_they_created(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let member = seed_user(&harness.store, "bob", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    enroll(&harness.store, &project, &member).await;
    let own_task = harness
        .service
        .create_task(
            &Actor::from(&member),
            CreateTaskRequest::new("Own task", project.id()),
        )
        .await
        .expect("task creation should succeed");
    let foreign_task = harness
        .service
        .create_task(
            &Actor::from(&admin),
            CreateTaskRequest::new("Foreign task", project.id()).with_assignee(member.id()),
        )
        .await
        .expect("task creation should succeed");

    harness
        .service
        .delete_task(&Actor::from(&member), own_task.id())
        .await
        .expect("deleting own task should succeed");
    let result = harness
        .service
        .delete_task(&Actor::from(&member), foreign_task.id())
        .await;

    assert!(matches!(result, Err(TaskWorkflowError::Denied(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_rejects_missing_task(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;

    let result = harness
        .service
        .delete_task(&Actor::from(&admin), TaskId::new())
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Repository(TaskRepositoryError::NotFound(
            _
        )))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_annotates_names_and_overdue_flag(harness: Harness) {
    let admin = seed_user(&harness.store, "admin", Role::Admin).await;
    let member = seed_user(&harness.store, "bob", Role::Developer).await;
    let project = seed_project(&harness.store, "Alpha", &admin).await;
    enroll(&harness.store, &project, &member).await;
    let actor = Actor::from(&admin);
    let yesterday = Utc::now() - Duration::days(1);
    let task = harness
        .service
        .create_task(
            &actor,
            CreateTaskRequest::new("Fix bug", project.id())
                .with_assignee(member.id())
                .with_deadline(yesterday),
        )
        .await
        .expect("task creation should succeed");

    let views = harness
        .service
        .list_tasks()
        .await
        .expect("listing should succeed");

    assert_eq!(views.len(), 1);
    let view = views.first().expect("one view");
    assert_eq!(view.id, task.id());
    assert_eq!(view.project_name.as_deref(), Some("Alpha"));
    assert_eq!(view.assignee_name.as_deref(), Some("bob"));
    assert!(view.overdue);

    harness
        .service
        .update_status(&actor, task.id(), TaskStatus::Done)
        .await
        .expect("status write should succeed");
    let views_after = harness
        .service
        .list_tasks()
        .await
        .expect("listing should succeed");
    let view_after = views_after.first().expect("one view");
    assert!(!view_after.overdue);
}
