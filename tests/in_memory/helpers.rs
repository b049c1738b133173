//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::authz::Actor;
use taskboard::dashboard::DashboardService;
use taskboard::identity::adapters::Sha256CredentialHasher;
use taskboard::identity::domain::{Role, User};
use taskboard::identity::services::{AccountService, RegisterUserRequest};
use taskboard::project::services::ProjectRegistryService;
use taskboard::storage::InMemoryBoardStore;
use taskboard::task::services::TaskWorkflowService;

/// Account service wired to the shared store.
pub type Accounts = AccountService<InMemoryBoardStore, Sha256CredentialHasher, DefaultClock>;

/// Project service wired to the shared store.
pub type Projects =
    ProjectRegistryService<InMemoryBoardStore, InMemoryBoardStore, InMemoryBoardStore, DefaultClock>;

/// Task service wired to the shared store.
pub type Tasks =
    TaskWorkflowService<InMemoryBoardStore, InMemoryBoardStore, InMemoryBoardStore, DefaultClock>;

/// Dashboard service wired to the shared store.
pub type Dashboard = DashboardService<InMemoryBoardStore, InMemoryBoardStore, DefaultClock>;

/// Fully wired application context over one shared in-memory store.
pub struct App {
    /// Shared store implementing every repository port.
    pub store: Arc<InMemoryBoardStore>,
    /// Identity service.
    pub accounts: Accounts,
    /// Project and membership service.
    pub projects: Projects,
    /// Task workflow service.
    pub tasks: Tasks,
    /// Dashboard read service.
    pub dashboard: Dashboard,
}

/// Builds a fresh application context.
pub fn app() -> App {
    let store = Arc::new(InMemoryBoardStore::new());
    let clock = Arc::new(DefaultClock);

    App {
        accounts: AccountService::new(
            Arc::clone(&store),
            Arc::new(Sha256CredentialHasher::new()),
            Arc::clone(&clock),
        ),
        projects: ProjectRegistryService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock),
        ),
        tasks: TaskWorkflowService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock),
        ),
        dashboard: DashboardService::new(Arc::clone(&store), Arc::clone(&store), clock),
        store,
    }
}

/// Registers a user with the given role and returns the aggregate.
pub async fn register(app: &App, username: &str, role: Role) -> User {
    app.accounts
        .register(RegisterUserRequest::new(username, "secret1").with_role(role))
        .await
        .expect("registration should succeed")
}

/// Builds an actor context for a registered user.
pub fn actor(user: &User) -> Actor {
    Actor::from(user)
}

/// Asserts that exactly one member with the expected username is listed.
///
/// # Errors
///
/// Returns an error if the member set does not contain exactly one entry
/// matching `expected`.
pub fn assert_single_member(
    members: &[taskboard::identity::domain::UserProfile],
    expected: &str,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        members.len() == 1,
        "expected exactly one member, found {}",
        members.len()
    );
    let member = members
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one member"))?;
    eyre::ensure!(
        member.username == expected,
        "expected member '{expected}', found '{}'",
        member.username
    );
    Ok(())
}
