//! Waymark SDK for Rust
//!
//! Replay-safe progress tracking for long-running workflows on a
//! durable-execution engine. Workflow code reports status changes, log
//! lines, and a terminal output through a [`progress::tracker::ProgressTracker`];
//! external callers poll one canonical [`progress::record::ProgressRecord`]
//! whether the run is mid-flight or finished.

pub mod activity;
pub mod client;
pub mod common;
pub mod error;
pub mod progress;
pub mod workflow;

/// Testing utilities: mock context and in-memory engine.
/// Available with the `testing` feature (enabled by default).
#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used types
pub use common::version::SemanticVersion;
pub use error::{Result, WaymarkError};

// Re-export workflow types
pub use workflow::context::{WorkflowContext, WorkflowContextExt};
pub use workflow::definition::WorkflowDefinition;

// Re-export activity types
pub use activity::context::ActivityContext;
pub use activity::definition::ActivityDefinition;

// Re-export progress types
pub use progress::record::{LogEntry, ProgressRecord};
pub use progress::tracker::ProgressTracker;

// Re-export client types
pub use client::state::{RuntimeStatus, WorkflowState};
pub use client::{WorkflowEngineClient, WorkflowEngineClientExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::activity::context::ActivityContext;
    pub use crate::activity::definition::ActivityDefinition;
    pub use crate::client::state::{RuntimeStatus, WorkflowState};
    pub use crate::client::{WorkflowEngineClient, WorkflowEngineClientExt};
    pub use crate::common::version::SemanticVersion;
    pub use crate::error::{Result, WaymarkError};
    pub use crate::progress::record::{LogEntry, ProgressRecord};
    pub use crate::progress::tracker::ProgressTracker;
    pub use crate::workflow::context::{WorkflowContext, WorkflowContextExt};
    pub use crate::workflow::definition::WorkflowDefinition;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value};
    pub use uuid::Uuid;
}
