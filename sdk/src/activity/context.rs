//! ActivityContext trait definition

use uuid::Uuid;

/// Context passed to an executing activity.
///
/// Activities run out of process and carry no determinism requirement of
/// their own; the engine may retry them, so `attempt` starts at 1 and
/// increments on each retry.
pub trait ActivityContext: Send + Sync {
    /// Unique ID of this activity execution
    fn activity_execution_id(&self) -> Uuid;

    /// ID of the workflow execution that scheduled this activity
    fn workflow_execution_id(&self) -> Uuid;

    /// Current attempt number, starting at 1
    fn attempt(&self) -> u32;
}
