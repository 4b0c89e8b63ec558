//! Error types for the Waymark SDK

/// Main error type for the Waymark SDK
#[derive(Debug, thiserror::Error)]
pub enum WaymarkError {
    /// Activity execution failed
    #[error("Activity failed: {0}")]
    ActivityFailed(String),

    /// Workflow execution failed
    #[error("Workflow failed: {0}")]
    WorkflowFailed(String),

    /// The engine reported the execution as failed. A distinct fault
    /// outcome: never folded into a progress record.
    #[error("Workflow execution {execution_id} failed: {error}")]
    ExecutionFailed {
        execution_id: String,
        error: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Workflow definition not found
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    /// Activity definition not found
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    /// No execution is known under the given identifier
    #[error("Execution not found: {0}")]
    ExecutionNotFound(String),

    /// External event delivery error
    #[error("Event error: {name}: {error}")]
    EventError { name: String, error: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Waymark SDK operations
pub type Result<T> = std::result::Result<T, WaymarkError>;
