//! Application services for project and membership orchestration.

mod registry;

pub use registry::{
    CreateProjectRequest, ProjectRegistryError, ProjectRegistryResult, ProjectRegistryService,
    ProjectSummary,
};
