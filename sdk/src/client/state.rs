//! Engine-reported execution state

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Runtime status of a workflow execution as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeStatus {
    /// Execution is currently running
    Running,
    /// Execution is suspended waiting for an external event
    Suspended,
    /// Execution completed successfully
    Completed,
    /// Execution failed
    Failed,
    /// Execution was cancelled; the last published custom status remains
    /// the visible record
    Cancelled,
}

/// Snapshot of one workflow execution as reported by the engine.
///
/// `custom_status` is the live progress slot (valid while not
/// completed); `output` is the terminal result (valid once completed);
/// `error` carries the engine's failure message for failed runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Opaque execution identifier
    pub execution_id: Uuid,
    /// Engine-reported runtime status
    pub runtime_status: RuntimeStatus,
    /// Latest custom-status snapshot, if one has been published
    pub custom_status: Option<Value>,
    /// Terminal output, present once completed
    pub output: Option<Value>,
    /// Failure message, present for failed executions
    pub error: Option<String>,
}

impl WorkflowState {
    /// Whether the execution has completed successfully
    pub fn is_completed(&self) -> bool {
        self.runtime_status == RuntimeStatus::Completed
    }

    /// Whether the engine reported the execution as failed
    pub fn has_failed(&self) -> bool {
        self.runtime_status == RuntimeStatus::Failed
    }
}
