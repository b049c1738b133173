//! Authorization policy for the tracking core.
//!
//! Authorization is a pure decision over a closed action enumeration and
//! a single role × action allow table, with resource-scoped refinements
//! for developer task mutations. Services call [`require`] (or
//! [`require_task_mutation`]) before touching any repository; a denial is
//! terminal and leaves state untouched.

mod action;
mod actor;
mod policy;

pub use action::Action;
pub use actor::Actor;
pub use policy::{AccessDenied, TaskScope, allows, require, require_task_mutation};
