//! Port contracts for identity management.
//!
//! Ports define infrastructure-agnostic interfaces used by identity
//! services.

pub mod hasher;
pub mod repository;

pub use hasher::CredentialHasher;
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
