//! Service layer for user registration, authentication, and enumeration.

use crate::authz::{AccessDenied, Action, Actor, require};
use crate::identity::{
    domain::{
        IdentityDomainError, Role, User, UserId, UserProfile, Username, validate_raw_password,
    },
    ports::{CredentialHasher, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    password: String,
    role: Option<Role>,
}

impl RegisterUserRequest {
    /// Creates a request with required registration fields.
    ///
    /// The role defaults to [`Role::Developer`] unless set with
    /// [`Self::with_role`].
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: None,
        }
    }

    /// Sets an explicit role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The actor's role may not perform the operation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
    /// The username or password did not match a registered user.
    ///
    /// Unknown usernames and credential mismatches are deliberately
    /// indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Registration and authentication orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, C>
where
    R: UserRepository,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> AccountService<R, H, C>
where
    R: UserRepository,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when the username or
    /// password fails validation, or [`AccountServiceError::Repository`]
    /// with [`UserRepositoryError::DuplicateUsername`] when the username
    /// is taken.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountServiceResult<User> {
        let username = Username::new(request.username)?;
        validate_raw_password(&request.password)?;
        let credential = self.hasher.hash(&request.password);
        let role = request.role.unwrap_or_default();

        let user = User::new(username, credential, role, &*self.clock);
        self.repository.store(&user).await?;
        tracing::info!(user = %user.id(), username = %user.username(), role = %user.role(), "user registered");
        Ok(user)
    }

    /// Authenticates a user by username and raw password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] when the
    /// username is unknown or the password does not match, and
    /// [`AccountServiceError::Repository`] when the lookup itself fails.
    pub async fn authenticate(&self, username: &str, password: &str) -> AccountServiceResult<User> {
        let Ok(login) = Username::new(username) else {
            return Err(AccountServiceError::InvalidCredentials);
        };

        let user = self
            .repository
            .find_by_username(&login)
            .await?
            .ok_or(AccountServiceError::InvalidCredentials)?;

        if !self.hasher.verify(password, user.credential()) {
            tracing::warn!(username = %login, "credential mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Returns profiles of all registered users, sorted by username.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Denied`] unless the actor is an
    /// admin or manager, or [`AccountServiceError::Repository`] when the
    /// lookup fails.
    pub async fn list_users(&self, actor: &Actor) -> AccountServiceResult<Vec<UserProfile>> {
        require(actor, Action::ListUsers)?;

        let mut users = self.repository.list_all().await?;
        users.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(users.iter().map(User::profile).collect())
    }

    /// Finds a user by internal identifier.
    ///
    /// Returns `Ok(None)` when no user has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> AccountServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
