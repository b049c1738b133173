//! Application services for task workflow orchestration.

mod workflow;

pub use workflow::{
    CreateTaskRequest, TaskView, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
};
