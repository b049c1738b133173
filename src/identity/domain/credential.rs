//! Opaque password credential type.

use super::IdentityDomainError;
use std::fmt;

/// Minimum number of characters accepted for a raw password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Opaque hashed password credential.
///
/// The domain never inspects the encoded value; hashing and verification
/// are delegated to the [`CredentialHasher`](crate::identity::ports::CredentialHasher)
/// port. The credential is excluded from every outward representation.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded credential produced by a hasher.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded credential for storage or verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    /// Redacts the encoded value so credentials never reach logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Validates a raw password prior to hashing.
///
/// # Errors
///
/// Returns [`IdentityDomainError::PasswordTooShort`] when the password has
/// fewer than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_raw_password(raw: &str) -> Result<(), IdentityDomainError> {
    let actual = raw.chars().count();
    if actual < MIN_PASSWORD_LENGTH {
        return Err(IdentityDomainError::PasswordTooShort {
            minimum: MIN_PASSWORD_LENGTH,
            actual,
        });
    }
    Ok(())
}
