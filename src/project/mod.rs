//! Projects and team membership.
//!
//! This module covers project creation and deletion (with cascading
//! cleanup of memberships and tasks) and the set-valued membership
//! relation staffed by privileged actors. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Repository adapters live in [`crate::storage`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
