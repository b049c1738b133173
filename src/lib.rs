//! Taskboard: team project and task tracking core.
//!
//! This crate provides the domain model and workflow/authorization
//! engine that governs projects, team membership, and the task
//! lifecycle, plus the read-side dashboard aggregation. Transport,
//! rendering, and token handling are thin collaborators: the core
//! receives validated inputs carrying an explicit actor and returns
//! domain objects or terminal rejections.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, hashing)
//!
//! # Modules
//!
//! - [`identity`]: Registration, authentication, and roles
//! - [`authz`]: Role × action authorization table
//! - [`project`]: Projects and team membership
//! - [`task`]: Task workflow and deadline evaluation
//! - [`dashboard`]: Read-only aggregation
//! - [`stories`]: External user-story generation boundary
//! - [`storage`]: In-memory and `PostgreSQL` adapters

pub mod authz;
pub mod dashboard;
pub mod identity;
pub mod project;
pub mod stories;
pub mod storage;
pub mod task;
