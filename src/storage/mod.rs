//! Storage adapters for the board's repository ports.
//!
//! All relations live in one logical store — users, projects,
//! memberships, tasks, and archived stories — mirroring the single
//! relational database of the persisted layout. The in-memory adapter
//! keeps them behind a single lock so cross-relation checks are atomic;
//! the `PostgreSQL` adapter gets the same guarantees from constraints
//! and per-operation transactions.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBoardStore;
pub use postgres::{BoardPgPool, PostgresBoardStore};
