//! Mock workflow context for unit testing workflows in isolation.

use crate::error::{Result, WaymarkError};
use crate::workflow::context::WorkflowContext;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

use super::TimeController;

/// Mock implementation of [`WorkflowContext`] for testing workflows in
/// isolation.
///
/// This mock allows you to:
/// - Preset activity results and external-event payloads
/// - Control logical time progression
/// - Inspect scheduled activities, awaited events, and every
///   custom-status snapshot the workflow published (the real engine
///   keeps only the latest; tests often want the full history)
///
/// # Example
///
/// ```ignore
/// use waymark_sdk::testing::MockWorkflowContext;
/// use serde_json::json;
///
/// let ctx = MockWorkflowContext::builder()
///     .input(json!({"user_id": "u-1"}))
///     .activity_result("send-redeem-code", json!("0042"))
///     .event_payload("redeem-code-attempt", json!("0042"))
///     .build();
///
/// let record = my_workflow.execute(&ctx, input).await?;
///
/// assert!(ctx.was_activity_scheduled("send-redeem-code"));
/// ```
pub struct MockWorkflowContext {
    inner: Arc<MockWorkflowContextInner>,
}

struct MockWorkflowContextInner {
    workflow_execution_id: Uuid,
    input: Value,
    time_controller: TimeController,
    activity_results: RwLock<HashMap<String, Value>>,
    event_payloads: RwLock<HashMap<String, VecDeque<Value>>>,
    scheduled_activities: RwLock<Vec<ScheduledActivity>>,
    awaited_events: RwLock<Vec<AwaitedEvent>>,
    published_statuses: RwLock<Vec<Option<Value>>>,
}

impl Clone for MockWorkflowContext {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// A scheduled activity call
#[derive(Debug, Clone)]
pub struct ScheduledActivity {
    pub kind: String,
    pub input: Value,
}

/// An awaited external event
#[derive(Debug, Clone)]
pub struct AwaitedEvent {
    pub name: String,
}

impl MockWorkflowContext {
    /// Create a new builder for MockWorkflowContext.
    pub fn builder() -> MockWorkflowContextBuilder {
        MockWorkflowContextBuilder::default()
    }

    /// Create a simple mock context with default values.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Get the time controller for this context.
    pub fn time_controller(&self) -> &TimeController {
        &self.inner.time_controller
    }

    /// Get all scheduled activities.
    pub fn scheduled_activities(&self) -> Vec<ScheduledActivity> {
        self.inner.scheduled_activities.read().clone()
    }

    /// Check if a specific activity kind was scheduled.
    pub fn was_activity_scheduled(&self, kind: &str) -> bool {
        self.inner
            .scheduled_activities
            .read()
            .iter()
            .any(|a| a.kind == kind)
    }

    /// Get all awaited events, in order.
    pub fn awaited_events(&self) -> Vec<AwaitedEvent> {
        self.inner.awaited_events.read().clone()
    }

    /// Check if a specific event was awaited.
    pub fn was_event_awaited(&self, name: &str) -> bool {
        self.inner
            .awaited_events
            .read()
            .iter()
            .any(|e| e.name == name)
    }

    /// Every custom-status publication, in order. `None` entries record
    /// the slot being cleared.
    pub fn published_statuses(&self) -> Vec<Option<Value>> {
        self.inner.published_statuses.read().clone()
    }

    /// The latest custom-status snapshot, if the slot is currently set.
    pub fn current_custom_status(&self) -> Option<Value> {
        self.inner.published_statuses.read().last().cloned().flatten()
    }

    /// Set an activity result after construction.
    pub fn set_activity_result(&self, kind: &str, result: Value) {
        self.inner
            .activity_results
            .write()
            .insert(kind.to_string(), result);
    }

    /// Queue an event payload after construction.
    pub fn push_event_payload(&self, name: &str, payload: Value) {
        self.inner
            .event_payloads
            .write()
            .entry(name.to_string())
            .or_default()
            .push_back(payload);
    }
}

impl Default for MockWorkflowContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for MockWorkflowContext.
#[derive(Default)]
pub struct MockWorkflowContextBuilder {
    workflow_execution_id: Option<Uuid>,
    input: Option<Value>,
    initial_time_millis: Option<i64>,
    activity_results: HashMap<String, Value>,
    event_payloads: HashMap<String, VecDeque<Value>>,
}

impl MockWorkflowContextBuilder {
    /// Set the workflow execution ID.
    pub fn workflow_execution_id(mut self, id: Uuid) -> Self {
        self.workflow_execution_id = Some(id);
        self
    }

    /// Set the workflow input.
    pub fn input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the initial logical time in milliseconds.
    pub fn initial_time_millis(mut self, time: i64) -> Self {
        self.initial_time_millis = Some(time);
        self
    }

    /// Set an expected activity result, returned for every call of the
    /// given kind.
    pub fn activity_result(mut self, kind: &str, result: Value) -> Self {
        self.activity_results.insert(kind.to_string(), result);
        self
    }

    /// Queue an event payload; payloads for the same name are consumed
    /// in FIFO order.
    pub fn event_payload(mut self, name: &str, payload: Value) -> Self {
        self.event_payloads
            .entry(name.to_string())
            .or_default()
            .push_back(payload);
        self
    }

    /// Build the MockWorkflowContext.
    pub fn build(self) -> MockWorkflowContext {
        let time_controller = match self.initial_time_millis {
            Some(time) => TimeController::with_initial_time(time),
            None => TimeController::new(),
        };

        MockWorkflowContext {
            inner: Arc::new(MockWorkflowContextInner {
                workflow_execution_id: self.workflow_execution_id.unwrap_or_else(Uuid::new_v4),
                input: self.input.unwrap_or(Value::Null),
                time_controller,
                activity_results: RwLock::new(self.activity_results),
                event_payloads: RwLock::new(self.event_payloads),
                scheduled_activities: RwLock::new(Vec::new()),
                awaited_events: RwLock::new(Vec::new()),
                published_statuses: RwLock::new(Vec::new()),
            }),
        }
    }
}

#[async_trait]
impl WorkflowContext for MockWorkflowContext {
    fn workflow_execution_id(&self) -> Uuid {
        self.inner.workflow_execution_id
    }

    fn input_raw(&self) -> &Value {
        &self.inner.input
    }

    fn current_time_millis(&self) -> i64 {
        self.inner.time_controller.current_time_millis()
    }

    async fn schedule_raw(&self, activity_kind: &str, input: Value) -> Result<Value> {
        self.inner
            .scheduled_activities
            .write()
            .push(ScheduledActivity {
                kind: activity_kind.to_string(),
                input,
            });

        match self.inner.activity_results.read().get(activity_kind) {
            Some(result) => Ok(result.clone()),
            None => Err(WaymarkError::Other(format!(
                "No mock result configured for activity kind: {}",
                activity_kind
            ))),
        }
    }

    async fn wait_for_event_raw(&self, name: &str) -> Result<Value> {
        self.inner.awaited_events.write().push(AwaitedEvent {
            name: name.to_string(),
        });

        let payload = self
            .inner
            .event_payloads
            .write()
            .get_mut(name)
            .and_then(|queue| queue.pop_front());

        match payload {
            Some(payload) => Ok(payload),
            None => Err(WaymarkError::Other(format!(
                "No mock payload configured for event: {}",
                name
            ))),
        }
    }

    fn set_custom_status_raw(&self, status: Option<Value>) -> Result<()> {
        self.inner.published_statuses.write().push(status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let ctx = MockWorkflowContext::new();
        assert!(!ctx.workflow_execution_id().is_nil());
        assert_eq!(ctx.input_raw(), &Value::Null);
    }

    #[test]
    fn test_builder_values() {
        let id = Uuid::new_v4();
        let ctx = MockWorkflowContext::builder()
            .workflow_execution_id(id)
            .input(json!({"key": "value"}))
            .initial_time_millis(1000)
            .build();

        assert_eq!(ctx.workflow_execution_id(), id);
        assert_eq!(ctx.input_raw(), &json!({"key": "value"}));
        assert_eq!(ctx.current_time_millis(), 1000);
    }

    #[tokio::test]
    async fn test_schedule_returns_preset_result() {
        let ctx = MockWorkflowContext::builder()
            .activity_result("send-email", json!({"sent": true}))
            .build();

        let result = ctx
            .schedule_raw("send-email", json!({"to": "user@example.com"}))
            .await
            .unwrap();
        assert_eq!(result, json!({"sent": true}));
        assert!(ctx.was_activity_scheduled("send-email"));
    }

    #[tokio::test]
    async fn test_schedule_unconfigured_activity_errors() {
        let ctx = MockWorkflowContext::new();
        assert!(ctx.schedule_raw("unknown", json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_event_payloads_fifo() {
        let ctx = MockWorkflowContext::builder()
            .event_payload("attempt", json!("first"))
            .event_payload("attempt", json!("second"))
            .build();

        assert_eq!(ctx.wait_for_event_raw("attempt").await.unwrap(), json!("first"));
        assert_eq!(ctx.wait_for_event_raw("attempt").await.unwrap(), json!("second"));
        assert!(ctx.wait_for_event_raw("attempt").await.is_err());
        assert!(ctx.was_event_awaited("attempt"));
    }

    #[test]
    fn test_published_statuses_history() {
        let ctx = MockWorkflowContext::new();
        ctx.set_custom_status_raw(Some(json!({"status": "a"}))).unwrap();
        ctx.set_custom_status_raw(Some(json!({"status": "b"}))).unwrap();
        ctx.set_custom_status_raw(None).unwrap();

        let history = ctx.published_statuses();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], Some(json!({"status": "b"})));
        assert_eq!(history[2], None);
        assert_eq!(ctx.current_custom_status(), None);
    }

    #[test]
    fn test_push_event_payload_after_build() {
        let ctx = MockWorkflowContext::new();
        ctx.push_event_payload("late", json!(1));
        ctx.set_activity_result("late-activity", json!(2));
    }
}
