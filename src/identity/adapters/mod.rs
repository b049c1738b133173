//! Adapter implementations for identity ports.
//!
//! The user repository adapters live in [`crate::storage`]; this module
//! holds the credential hasher.

mod hasher;

pub use hasher::Sha256CredentialHasher;
