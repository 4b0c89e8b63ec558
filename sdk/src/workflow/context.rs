//! WorkflowContext trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Context for workflow execution: the published capabilities of the
/// durable-execution engine, as seen from orchestrating code.
///
/// Everything behind this trait is recorded and replayed by the engine.
/// A workflow function must derive all of its decisions from these
/// accessors (activity results, event payloads, the logical clock) so
/// that replaying the recorded history reproduces the exact same steps.
///
/// This trait uses `Value` types for object-safety. For typed APIs, use
/// the extension methods provided by `WorkflowContextExt`.
#[async_trait]
pub trait WorkflowContext: Send + Sync {
    /// Get the unique ID of this workflow execution
    fn workflow_execution_id(&self) -> Uuid;

    /// Get the raw workflow input as JSON Value
    fn input_raw(&self) -> &Value;

    /// Current logical time in milliseconds. Identical across replays of
    /// the same step; never a wall-clock read.
    fn current_time_millis(&self) -> i64;

    /// Schedule an out-of-process activity and wait for its completion
    /// (raw Value version). The engine owns retries and timeouts.
    async fn schedule_raw(&self, activity_kind: &str, input: Value) -> Result<Value>;

    /// Suspend until a named external event arrives, yielding its payload
    /// (raw Value version). Events with the same name are consumed in
    /// FIFO order.
    async fn wait_for_event_raw(&self, name: &str) -> Result<Value>;

    /// Publish or overwrite the execution's custom-status slot.
    /// `None` clears the slot. The slot holds only the latest snapshot;
    /// the write is synchronous and engine-buffered, no I/O.
    fn set_custom_status_raw(&self, status: Option<Value>) -> Result<()>;
}

/// Extension trait for typed workflow context operations.
/// These methods provide type-safe wrappers around the raw Value methods.
pub trait WorkflowContextExt: WorkflowContext {
    /// Get the workflow input as the specified type
    fn input<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.input_raw().clone())
            .map_err(crate::error::WaymarkError::Serialization)
    }

    /// Schedule an activity with typed input and output
    fn schedule<I, T>(
        &self,
        activity_kind: &str,
        input: &I,
    ) -> impl std::future::Future<Output = Result<T>> + Send
    where
        I: serde::Serialize + Sync,
        T: serde::de::DeserializeOwned,
        Self: Sync,
    {
        async move {
            let input =
                serde_json::to_value(input).map_err(crate::error::WaymarkError::Serialization)?;
            let output = self.schedule_raw(activity_kind, input).await?;
            serde_json::from_value(output).map_err(crate::error::WaymarkError::Serialization)
        }
    }

    /// Wait for a named external event with a typed payload
    fn wait_for_event<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<T>> + Send
    where
        Self: Sync,
    {
        async move {
            let payload = self.wait_for_event_raw(name).await?;
            serde_json::from_value(payload).map_err(crate::error::WaymarkError::Serialization)
        }
    }

    /// Publish a typed custom-status snapshot
    fn set_custom_status<T: serde::Serialize>(&self, status: &T) -> Result<()> {
        let value =
            serde_json::to_value(status).map_err(crate::error::WaymarkError::Serialization)?;
        self.set_custom_status_raw(Some(value))
    }

    /// Clear the custom-status slot
    fn clear_custom_status(&self) -> Result<()> {
        self.set_custom_status_raw(None)
    }
}

// Implement WorkflowContextExt for all types that implement WorkflowContext
impl<T: WorkflowContext + ?Sized> WorkflowContextExt for T {}
