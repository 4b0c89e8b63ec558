//! Progress tracker scenarios exercised against the mock context.

use serde::{Deserialize, Serialize};
use std::fmt;
use waymark_sdk::testing::MockWorkflowContext;
use waymark_sdk::{
    ProgressRecord, ProgressTracker, RuntimeStatus, WorkflowContext, WorkflowState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum Phase {
    #[default]
    Started,
    SendingCode,
    WaitingForRedeem,
    CodeInvalid,
    Redeemed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Started => "Started",
            Phase::SendingCode => "SendingCode",
            Phase::WaitingForRedeem => "WaitingForRedeem",
            Phase::CodeInvalid => "CodeInvalid",
            Phase::Redeemed => "Redeemed",
        };
        f.write_str(name)
    }
}

fn messages(record: &ProgressRecord<String, Phase>) -> Vec<&str> {
    record.logs.iter().map(|l| l.message.as_str()).collect()
}

#[test]
fn scenario_a_transition_then_output() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();

    tracker.set_status(Phase::SendingCode).unwrap();
    assert_eq!(
        tracker
            .logs()
            .iter()
            .map(|l| l.message.as_str())
            .collect::<Vec<_>>(),
        vec![
            "Initial status set to 'Started'",
            "Status changed from 'Started' to 'SendingCode'",
        ]
    );

    let record = tracker.set_output(Some("X".to_string())).unwrap();
    assert_eq!(record.output.as_deref(), Some("X"));
    assert_eq!(record.status, Phase::SendingCode);
    assert_eq!(record.logs.len(), 2);
    assert_eq!(
        messages(&record),
        vec![
            "Initial status set to 'Started'",
            "Status changed from 'Started' to 'SendingCode'",
        ]
    );
}

#[test]
fn scenario_b_invalid_redeem_path() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();

    tracker.set_status(Phase::WaitingForRedeem).unwrap();
    tracker.log("waiting...").unwrap();
    tracker.set_status(Phase::CodeInvalid).unwrap();

    let record = tracker.set_output(None).unwrap();
    assert!(record.output.is_none());
    assert_eq!(record.status, Phase::CodeInvalid);
    assert_eq!(record.logs.len(), 4);
    assert_eq!(
        messages(&record),
        vec![
            "Initial status set to 'Started'",
            "Status changed from 'Started' to 'WaitingForRedeem'",
            "waiting...",
            "Status changed from 'WaitingForRedeem' to 'CodeInvalid'",
        ]
    );
}

#[test]
fn log_count_law_holds_for_interleaved_calls() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();

    // N = 4 transitions, M = 3 plain logs, interleaved
    tracker.set_status(Phase::SendingCode).unwrap();
    tracker.log("code queued").unwrap();
    tracker.set_status(Phase::WaitingForRedeem).unwrap();
    tracker.log("user notified").unwrap();
    tracker.log("reminder sent").unwrap();
    tracker.set_status(Phase::Redeemed).unwrap();
    tracker.set_status(Phase::CodeInvalid).unwrap();

    assert_eq!(tracker.logs().len(), 1 + 4 + 3);

    let stamps: Vec<i64> = tracker.logs().iter().map(|l| l.timestamp_millis).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn finalized_record_roundtrips_through_the_output_channel() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();
    tracker.set_status(Phase::Redeemed).unwrap();
    let record = tracker.set_output(Some("certificate".to_string())).unwrap();

    // The workflow returns the record; the engine stores it on the
    // output channel. A completed-state read must reproduce it exactly,
    // no matter how often the engine replayed in between.
    let state = WorkflowState {
        execution_id: ctx.workflow_execution_id(),
        runtime_status: RuntimeStatus::Completed,
        custom_status: None,
        output: Some(serde_json::to_value(&record).unwrap()),
        error: None,
    };

    let read: ProgressRecord<String, Phase> = state.progress().unwrap();
    assert_eq!(read, record);
}

#[test]
fn no_custom_status_remains_after_finalize() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();
    tracker.set_status(Phase::SendingCode).unwrap();
    assert!(ctx.current_custom_status().is_some());

    let _record = tracker.set_output(None).unwrap();

    // The slot is cleared and no publication follows the clear, so a
    // reader can never again source this execution from custom status.
    assert_eq!(ctx.current_custom_status(), None);
    assert_eq!(ctx.published_statuses().last(), Some(&None));
}

#[test]
fn reader_reflects_snapshot_while_running() {
    let ctx = MockWorkflowContext::new();
    let mut tracker: ProgressTracker<'_, String, Phase> =
        ProgressTracker::begin(&ctx, Phase::Started, None).unwrap();
    tracker.set_status(Phase::WaitingForRedeem).unwrap();

    // What the mock saw published is what the engine would serve to a
    // mid-flight reader.
    let state = WorkflowState {
        execution_id: ctx.workflow_execution_id(),
        runtime_status: RuntimeStatus::Running,
        custom_status: ctx.current_custom_status(),
        output: None,
        error: None,
    };

    let read: ProgressRecord<String, Phase> = state.progress().unwrap();
    assert_eq!(read.status, Phase::WaitingForRedeem);
    assert_eq!(read.logs.len(), 2);
    assert!(read.output.is_none());
}
