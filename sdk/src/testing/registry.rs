//! Registries mapping workflow and activity kinds to boxed executors

use crate::activity::context::ActivityContext;
use crate::activity::definition::ActivityDefinition;
use crate::error::{Result, WaymarkError};
use crate::workflow::context::WorkflowContext;
use crate::workflow::definition::WorkflowDefinition;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for boxed workflow execution functions
type BoxedWorkflowFn = Box<
    dyn Fn(Arc<dyn WorkflowContext>, Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// Type alias for boxed activity execution functions
type BoxedActivityFn = Box<
    dyn Fn(Value, Arc<dyn ActivityContext>) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// A registered workflow: metadata plus a type-erased executor that
/// deserializes the input, runs the definition, and reserializes the
/// output.
pub struct RegisteredWorkflow {
    pub kind: String,
    pub name: String,
    execute_fn: BoxedWorkflowFn,
}

impl RegisteredWorkflow {
    /// Execute the workflow
    pub async fn execute(&self, ctx: Arc<dyn WorkflowContext>, input: Value) -> Result<Value> {
        (self.execute_fn)(ctx, input).await
    }
}

impl std::fmt::Debug for RegisteredWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredWorkflow")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry for code-first workflow definitions
#[derive(Debug, Default)]
pub struct WorkflowRegistry {
    workflows: HashMap<String, Arc<RegisteredWorkflow>>,
}

impl WorkflowRegistry {
    /// Create a new empty workflow registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workflow definition
    pub fn register<W>(&mut self, workflow: W) -> Result<()>
    where
        W: WorkflowDefinition + 'static,
    {
        let kind = workflow.kind().to_string();
        let name = workflow.name().to_string();
        if self.workflows.contains_key(&kind) {
            return Err(WaymarkError::InvalidConfiguration(format!(
                "workflow already registered: {}",
                kind
            )));
        }

        let workflow = Arc::new(workflow);
        let execute_fn: BoxedWorkflowFn = Box::new(move |ctx, input| {
            let workflow = workflow.clone();
            Box::pin(async move {
                let input: W::Input =
                    serde_json::from_value(input).map_err(WaymarkError::Serialization)?;
                let output = workflow.execute(ctx.as_ref(), input).await?;
                serde_json::to_value(output).map_err(WaymarkError::Serialization)
            })
        });

        self.workflows.insert(
            kind.clone(),
            Arc::new(RegisteredWorkflow {
                kind,
                name,
                execute_fn,
            }),
        );
        Ok(())
    }

    /// Look up a registered workflow by kind
    pub fn get(&self, kind: &str) -> Option<Arc<RegisteredWorkflow>> {
        self.workflows.get(kind).cloned()
    }

    /// Registered kinds, unordered
    pub fn kinds(&self) -> Vec<String> {
        self.workflows.keys().cloned().collect()
    }
}

/// A registered activity, type-erased like [`RegisteredWorkflow`]
pub struct RegisteredActivity {
    pub kind: String,
    pub name: String,
    execute_fn: BoxedActivityFn,
}

impl RegisteredActivity {
    /// Execute the activity
    pub async fn execute(&self, input: Value, ctx: Arc<dyn ActivityContext>) -> Result<Value> {
        (self.execute_fn)(input, ctx).await
    }
}

impl std::fmt::Debug for RegisteredActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredActivity")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry for activity definitions
#[derive(Debug, Default)]
pub struct ActivityRegistry {
    activities: HashMap<String, Arc<RegisteredActivity>>,
}

impl ActivityRegistry {
    /// Create a new empty activity registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an activity definition
    pub fn register<A>(&mut self, activity: A) -> Result<()>
    where
        A: ActivityDefinition + 'static,
    {
        let kind = activity.kind().to_string();
        let name = activity.name().to_string();
        if self.activities.contains_key(&kind) {
            return Err(WaymarkError::InvalidConfiguration(format!(
                "activity already registered: {}",
                kind
            )));
        }

        let activity = Arc::new(activity);
        let execute_fn: BoxedActivityFn = Box::new(move |input, ctx| {
            let activity = activity.clone();
            Box::pin(async move {
                let input: A::Input =
                    serde_json::from_value(input).map_err(WaymarkError::Serialization)?;
                let output = activity.execute(input, ctx.as_ref()).await?;
                serde_json::to_value(output).map_err(WaymarkError::Serialization)
            })
        });

        self.activities.insert(
            kind.clone(),
            Arc::new(RegisteredActivity {
                kind,
                name,
                execute_fn,
            }),
        );
        Ok(())
    }

    /// Look up a registered activity by kind
    pub fn get(&self, kind: &str) -> Option<Arc<RegisteredActivity>> {
        self.activities.get(kind).cloned()
    }
}
