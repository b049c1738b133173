//! User story generation via an external collaborator.
//!
//! Text generation is an opaque capability behind the
//! [`StoryGenerator`] port: the core validates the description, passes
//! generator failures through unchanged, and optionally archives the
//! generated lines against a project.

pub mod domain;
pub mod ports;
mod service;

pub use domain::{StoryDomainError, StoryId, UserStory};
pub use ports::{
    StoryGenerator, StoryGeneratorError, StoryRepository, StoryRepositoryError,
    StoryRepositoryResult,
};
pub use service::{StoryService, StoryServiceError, StoryServiceResult};
