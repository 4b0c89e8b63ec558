//! Testing utilities: mock workflow context, logical time control, and
//! an in-memory engine for exercising workflows without a server.

mod engine;
mod mock_workflow_context;
mod registry;
mod time_controller;

pub use engine::InMemoryEngine;
pub use mock_workflow_context::{
    AwaitedEvent, MockWorkflowContext, MockWorkflowContextBuilder, ScheduledActivity,
};
pub use registry::{ActivityRegistry, RegisteredActivity, RegisteredWorkflow, WorkflowRegistry};
pub use time_controller::TimeController;
