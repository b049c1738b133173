//! Salted SHA-256 credential hasher adapter.

use crate::identity::domain::PasswordHash;
use crate::identity::ports::CredentialHasher;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Separator between the salt and digest segments of an encoded credential.
const SEGMENT_SEPARATOR: char = '$';

/// Credential hasher backed by salted SHA-256.
///
/// Encoded credentials have the form `<salt>$<hex digest>` with a fresh
/// random salt per credential, so equal passwords never share an encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CredentialHasher;

impl Sha256CredentialHasher {
    /// Creates a new hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, raw: &str) -> PasswordHash {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = salted_digest(&salt, raw);
        PasswordHash::new(format!("{salt}{SEGMENT_SEPARATOR}{digest}"))
    }

    fn verify(&self, raw: &str, credential: &PasswordHash) -> bool {
        credential
            .as_str()
            .split_once(SEGMENT_SEPARATOR)
            .is_some_and(|(salt, digest)| salted_digest(salt, raw) == digest)
    }
}

fn salted_digest(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    let digest = hasher.finalize();

    let mut encoded = String::with_capacity(digest.len() * 2);
    for byte in digest {
        encoded.push_str(&format!("{byte:02x}"));
    }
    encoded
}
