//! User identity and role assignment.
//!
//! This module covers registration, authentication, and user
//! enumeration: validated usernames, the closed role enumeration, and
//! opaque password credentials hashed behind a port. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
