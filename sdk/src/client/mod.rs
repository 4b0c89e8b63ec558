//! Client-side API for external callers of the engine

pub mod state;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use state::WorkflowState;
use uuid::Uuid;

/// The engine surface exposed to external callers: start an execution,
/// signal a running one, and fetch its state snapshot.
///
/// This trait uses `Value` types for object-safety. For typed APIs, use
/// the extension methods provided by `WorkflowEngineClientExt`.
#[async_trait]
pub trait WorkflowEngineClient: Send + Sync {
    /// Start a new execution of the named workflow kind with the given
    /// input; returns the opaque execution identifier.
    async fn start_workflow_raw(&self, kind: &str, input: Value) -> Result<Uuid>;

    /// Deliver a named external event to a running execution.
    async fn raise_event_raw(&self, execution_id: Uuid, name: &str, payload: Value) -> Result<()>;

    /// Fetch the engine's state snapshot for an execution.
    async fn get_workflow_state(&self, execution_id: Uuid) -> Result<WorkflowState>;
}

/// Extension trait for typed engine-client operations.
pub trait WorkflowEngineClientExt: WorkflowEngineClient {
    /// Start a workflow with typed input
    fn start_workflow_typed<I: serde::Serialize + Sync>(
        &self,
        kind: &str,
        input: &I,
    ) -> impl std::future::Future<Output = Result<Uuid>> + Send
    where
        Self: Sync,
    {
        async move {
            let input =
                serde_json::to_value(input).map_err(crate::error::WaymarkError::Serialization)?;
            self.start_workflow_raw(kind, input).await
        }
    }

    /// Raise an event with a typed payload
    fn raise_event_typed<T: serde::Serialize + Sync>(
        &self,
        execution_id: Uuid,
        name: &str,
        payload: &T,
    ) -> impl std::future::Future<Output = Result<()>> + Send
    where
        Self: Sync,
    {
        async move {
            let payload =
                serde_json::to_value(payload).map_err(crate::error::WaymarkError::Serialization)?;
            self.raise_event_raw(execution_id, name, payload).await
        }
    }
}

// Implement WorkflowEngineClientExt for all types that implement WorkflowEngineClient
impl<T: WorkflowEngineClient + ?Sized> WorkflowEngineClientExt for T {}
