//! In-memory workflow engine for tests and demos.
//!
//! Implements the observable behavior of the engine contract (start,
//! signal, custom status, terminal output, runtime status) without any
//! of the durable machinery: no event history, no replay. Workflows
//! run as plain tokio tasks; a process restart loses them. Good enough
//! to exercise everything built on the contract.

use crate::activity::context::ActivityContext;
use crate::activity::definition::ActivityDefinition;
use crate::client::state::{RuntimeStatus, WorkflowState};
use crate::client::WorkflowEngineClient;
use crate::error::{Result, WaymarkError};
use crate::testing::registry::{ActivityRegistry, WorkflowRegistry};
use crate::testing::TimeController;
use crate::workflow::context::WorkflowContext;
use crate::workflow::definition::WorkflowDefinition;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};
use uuid::Uuid;

/// In-memory engine implementing [`WorkflowEngineClient`].
///
/// # Example
///
/// ```ignore
/// use waymark_sdk::testing::InMemoryEngine;
/// use serde_json::json;
///
/// let engine = InMemoryEngine::new();
/// engine.register_workflow(MyWorkflow)?;
/// engine.register_activity(MyActivity)?;
///
/// let id = engine.start_workflow("my-workflow", json!({"n": 1}))?;
/// engine.raise_event(id, "approval", json!(true))?;
/// let state = engine.get_state(id)?;
/// ```
pub struct InMemoryEngine {
    inner: Arc<EngineInner>,
}

impl Clone for InMemoryEngine {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct EngineInner {
    workflows: RwLock<WorkflowRegistry>,
    activities: RwLock<ActivityRegistry>,
    activity_results: RwLock<HashMap<String, Value>>,
    time_controller: TimeController,
    executions: RwLock<HashMap<Uuid, ExecutionEntry>>,
    event_queues: Mutex<HashMap<(Uuid, String), EventQueue>>,
}

#[derive(Debug, Clone)]
struct ExecutionEntry {
    runtime_status: RuntimeStatus,
    custom_status: Option<Value>,
    output: Option<Value>,
    error: Option<String>,
}

#[derive(Default)]
struct EventQueue {
    pending: VecDeque<Value>,
    waiters: VecDeque<oneshot::Sender<Value>>,
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self::with_time_controller(TimeController::new())
    }

    /// Create a new engine with a specific initial logical time.
    pub fn with_initial_time(initial_time_millis: i64) -> Self {
        Self::with_time_controller(TimeController::with_initial_time(initial_time_millis))
    }

    fn with_time_controller(time_controller: TimeController) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                workflows: RwLock::new(WorkflowRegistry::new()),
                activities: RwLock::new(ActivityRegistry::new()),
                activity_results: RwLock::new(HashMap::new()),
                time_controller,
                executions: RwLock::new(HashMap::new()),
                event_queues: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get the time controller steering the engine's logical clock.
    pub fn time_controller(&self) -> &TimeController {
        &self.inner.time_controller
    }

    /// Register a workflow definition.
    pub fn register_workflow<W>(&self, workflow: W) -> Result<()>
    where
        W: WorkflowDefinition + 'static,
    {
        self.inner.workflows.write().register(workflow)
    }

    /// Register an activity definition.
    pub fn register_activity<A>(&self, activity: A) -> Result<()>
    where
        A: ActivityDefinition + 'static,
    {
        self.inner.activities.write().register(activity)
    }

    /// Preset a canned result for an activity kind, used when no
    /// registered activity matches.
    pub fn set_activity_result(&self, kind: &str, result: Value) {
        self.inner
            .activity_results
            .write()
            .insert(kind.to_string(), result);
    }

    /// Start a new execution of the named workflow kind.
    ///
    /// The orchestration runs on a spawned tokio task; poll
    /// [`get_state`](Self::get_state) to observe it.
    pub fn start_workflow(&self, kind: &str, input: Value) -> Result<Uuid> {
        let workflow = self
            .inner
            .workflows
            .read()
            .get(kind)
            .ok_or_else(|| WaymarkError::WorkflowNotFound(kind.to_string()))?;

        let execution_id = Uuid::new_v4();
        self.inner.executions.write().insert(
            execution_id,
            ExecutionEntry {
                runtime_status: RuntimeStatus::Running,
                custom_status: None,
                output: None,
                error: None,
            },
        );

        info!(kind = %kind, execution_id = %execution_id, "Starting workflow execution");

        let ctx: Arc<dyn WorkflowContext> = Arc::new(EngineWorkflowContext {
            inner: self.inner.clone(),
            execution_id,
            input: input.clone(),
        });

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let result = workflow.execute(ctx, input).await;

            let mut executions = inner.executions.write();
            let Some(entry) = executions.get_mut(&execution_id) else {
                return;
            };
            match result {
                Ok(output) => {
                    info!(execution_id = %execution_id, "Workflow execution completed");
                    entry.runtime_status = RuntimeStatus::Completed;
                    entry.output = Some(output);
                }
                Err(err) => {
                    error!(execution_id = %execution_id, error = %err, "Workflow execution failed");
                    entry.runtime_status = RuntimeStatus::Failed;
                    entry.error = Some(err.to_string());
                }
            }
        });

        Ok(execution_id)
    }

    /// Deliver a named external event to an execution. Events queue in
    /// FIFO order until the orchestration awaits them.
    pub fn raise_event(&self, execution_id: Uuid, name: &str, payload: Value) -> Result<()> {
        if !self.inner.executions.read().contains_key(&execution_id) {
            return Err(WaymarkError::ExecutionNotFound(execution_id.to_string()));
        }

        info!(execution_id = %execution_id, event = %name, "Raising external event");

        let mut queues = self.inner.event_queues.lock();
        let queue = queues
            .entry((execution_id, name.to_string()))
            .or_default();

        let mut payload = payload;
        while let Some(waiter) = queue.waiters.pop_front() {
            match waiter.send(payload) {
                Ok(()) => return Ok(()),
                // Waiter side dropped, hand the payload to the next one
                Err(returned) => payload = returned,
            }
        }
        queue.pending.push_back(payload);
        Ok(())
    }

    /// Fetch the engine's state snapshot for an execution.
    pub fn get_state(&self, execution_id: Uuid) -> Result<WorkflowState> {
        let executions = self.inner.executions.read();
        let entry = executions
            .get(&execution_id)
            .ok_or_else(|| WaymarkError::ExecutionNotFound(execution_id.to_string()))?;
        Ok(WorkflowState {
            execution_id,
            runtime_status: entry.runtime_status,
            custom_status: entry.custom_status.clone(),
            output: entry.output.clone(),
            error: entry.error.clone(),
        })
    }
}

#[async_trait]
impl WorkflowEngineClient for InMemoryEngine {
    async fn start_workflow_raw(&self, kind: &str, input: Value) -> Result<Uuid> {
        self.start_workflow(kind, input)
    }

    async fn raise_event_raw(&self, execution_id: Uuid, name: &str, payload: Value) -> Result<()> {
        self.raise_event(execution_id, name, payload)
    }

    async fn get_workflow_state(&self, execution_id: Uuid) -> Result<WorkflowState> {
        self.get_state(execution_id)
    }
}

/// Workflow context bound to one in-memory execution
struct EngineWorkflowContext {
    inner: Arc<EngineInner>,
    execution_id: Uuid,
    input: Value,
}

impl EngineWorkflowContext {
    fn set_runtime_status(&self, status: RuntimeStatus) {
        if let Some(entry) = self.inner.executions.write().get_mut(&self.execution_id) {
            entry.runtime_status = status;
        }
    }
}

#[async_trait]
impl WorkflowContext for EngineWorkflowContext {
    fn workflow_execution_id(&self) -> Uuid {
        self.execution_id
    }

    fn input_raw(&self) -> &Value {
        &self.input
    }

    fn current_time_millis(&self) -> i64 {
        self.inner.time_controller.current_time_millis()
    }

    async fn schedule_raw(&self, activity_kind: &str, input: Value) -> Result<Value> {
        let activity = self.inner.activities.read().get(activity_kind);
        if let Some(activity) = activity {
            let ctx: Arc<dyn ActivityContext> = Arc::new(EngineActivityContext {
                activity_execution_id: Uuid::new_v4(),
                workflow_execution_id: self.execution_id,
                attempt: 1,
            });
            return activity.execute(input, ctx).await;
        }

        let preset = self
            .inner
            .activity_results
            .read()
            .get(activity_kind)
            .cloned();
        preset.ok_or_else(|| WaymarkError::ActivityNotFound(activity_kind.to_string()))
    }

    async fn wait_for_event_raw(&self, name: &str) -> Result<Value> {
        let receiver = {
            let mut queues = self.inner.event_queues.lock();
            let queue = queues
                .entry((self.execution_id, name.to_string()))
                .or_default();
            if let Some(payload) = queue.pending.pop_front() {
                return Ok(payload);
            }
            let (sender, receiver) = oneshot::channel();
            queue.waiters.push_back(sender);
            receiver
        };

        self.set_runtime_status(RuntimeStatus::Suspended);
        let payload = receiver.await.map_err(|_| WaymarkError::EventError {
            name: name.to_string(),
            error: "event channel closed".to_string(),
        });
        self.set_runtime_status(RuntimeStatus::Running);
        payload
    }

    fn set_custom_status_raw(&self, status: Option<Value>) -> Result<()> {
        let mut executions = self.inner.executions.write();
        let entry = executions
            .get_mut(&self.execution_id)
            .ok_or_else(|| WaymarkError::ExecutionNotFound(self.execution_id.to_string()))?;
        entry.custom_status = status;
        Ok(())
    }
}

/// Activity context handed out by the in-memory engine
struct EngineActivityContext {
    activity_execution_id: Uuid,
    workflow_execution_id: Uuid,
    attempt: u32,
}

impl ActivityContext for EngineActivityContext {
    fn activity_execution_id(&self) -> Uuid {
        self.activity_execution_id
    }

    fn workflow_execution_id(&self) -> Uuid {
        self.workflow_execution_id
    }

    fn attempt(&self) -> u32 {
        self.attempt
    }
}
