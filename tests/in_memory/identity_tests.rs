//! Integration tests for registration and authentication flows.

use super::helpers::{actor, app, register};
use rstest::rstest;
use taskboard::identity::domain::Role;
use taskboard::identity::services::{AccountServiceError, RegisterUserRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_authenticate_round_trip() {
    let app = app();

    let registered = app
        .accounts
        .register(RegisterUserRequest::new("alice", "hunter22"))
        .await
        .expect("registration should succeed");
    let authenticated = app
        .accounts
        .authenticate("alice", "hunter22")
        .await
        .expect("authentication should succeed");

    assert_eq!(authenticated.id(), registered.id());
    assert_eq!(authenticated.role(), Role::Developer);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected_across_roles() {
    let app = app();
    register(&app, "alice", Role::Developer).await;

    let result = app
        .accounts
        .register(RegisterUserRequest::new("alice", "other-secret").with_role(Role::Admin))
        .await;

    assert!(matches!(result, Err(AccountServiceError::Repository(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_enumeration_is_limited_to_privileged_roles() {
    let app = app();
    let developer = register(&app, "dev", Role::Developer).await;
    let manager = register(&app, "manager", Role::Manager).await;

    let denied = app.accounts.list_users(&actor(&developer)).await;
    assert!(matches!(denied, Err(AccountServiceError::Denied(_))));

    let profiles = app
        .accounts
        .list_users(&actor(&manager))
        .await
        .expect("manager listing should succeed");
    assert_eq!(profiles.len(), 2);
}
