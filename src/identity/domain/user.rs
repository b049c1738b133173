//! User aggregate root and outward profile projection.

use super::{PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// User aggregate root.
///
/// Holds the opaque credential and therefore never derives `Serialize`;
/// outward representations go through [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    credential: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted credential.
    pub credential: PasswordHash,
    /// Persisted role.
    pub role: Role,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user at registration time.
    #[must_use]
    pub fn new(username: Username, credential: PasswordHash, role: Role, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            username,
            credential,
            role,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            credential: data.credential,
            role: data.role,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored credential for verification or persistence.
    #[must_use]
    pub const fn credential(&self) -> &PasswordHash {
        &self.credential
    }

    /// Returns the assigned role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the outward profile projection without the credential.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.as_str().to_owned(),
            role: self.role,
        }
    }
}

/// Credential-free user representation returned across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Assigned role.
    pub role: Role,
}
