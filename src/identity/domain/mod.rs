//! Domain model for user identity and role assignment.
//!
//! The identity domain models registration-time validation, the closed
//! role enumeration, and the opaque password credential while keeping
//! hashing and persistence outside of the domain boundary.

mod credential;
mod error;
mod ids;
mod role;
mod user;
mod username;

pub use credential::{MIN_PASSWORD_LENGTH, PasswordHash, validate_raw_password};
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use role::Role;
pub use user::{PersistedUserData, User, UserProfile};
pub use username::Username;
