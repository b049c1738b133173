//! Credential hashing port.

use crate::identity::domain::PasswordHash;

/// Opaque credential hashing and verification capability.
///
/// The domain treats credential comparison as an opaque operation; the
/// algorithm, salting, and encoding are adapter concerns.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a raw password into an opaque stored credential.
    fn hash(&self, raw: &str) -> PasswordHash;

    /// Verifies a raw password against a stored credential.
    fn verify(&self, raw: &str, credential: &PasswordHash) -> bool;
}
