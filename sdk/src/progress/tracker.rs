//! ProgressTracker - deterministic bookkeeping of one execution's progress

use crate::error::Result;
use crate::progress::record::{LogEntry, ProgressRecord};
use crate::workflow::context::WorkflowContext;
use serde::Serialize;
use std::fmt;

/// Mutable progress accumulator bound to one workflow execution.
///
/// The orchestrating workflow function exclusively owns the tracker; the
/// tracker in turn owns the execution's single [`ProgressRecord`]. Every
/// mutation republishes the whole record to the engine's custom-status
/// slot, so external pollers always see the latest snapshot while the
/// run is live.
///
/// [`set_output`](Self::set_output) consumes the tracker and returns the
/// finalized record for the workflow to return as its terminal result.
/// Consuming `self` makes post-completion mutation a compile error
/// rather than a runtime policy.
///
/// # Example
///
/// ```ignore
/// let mut progress = ProgressTracker::begin(ctx, Status::Started, None)?;
/// progress.set_status(Status::Working)?;
/// progress.log("halfway there")?;
/// return progress.set_output(Some(result));
/// ```
pub struct ProgressTracker<'a, O, S> {
    ctx: &'a dyn WorkflowContext,
    record: ProgressRecord<O, S>,
    prefix: Option<String>,
}

impl<'a, O, S> ProgressTracker<'a, O, S>
where
    O: Serialize,
    S: Serialize + fmt::Display,
{
    /// Start tracking with the given initial status.
    ///
    /// Appends (and publishes) one entry recording the initial status.
    /// If `prefix` is set, it is prepended to every subsequent message,
    /// synthesized transition lines included.
    pub fn begin(
        ctx: &'a dyn WorkflowContext,
        initial_status: S,
        prefix: Option<&str>,
    ) -> Result<Self> {
        let mut tracker = Self {
            ctx,
            record: ProgressRecord::with_status(initial_status),
            prefix: prefix.map(str::to_owned),
        };
        let line = format!("Initial status set to '{}'", tracker.record.status);
        tracker.log(line)?;
        Ok(tracker)
    }

    /// Append a log line and republish the record.
    ///
    /// The timestamp is the context's logical clock. The message must be
    /// derived only from replay-deterministic inputs (activity results,
    /// event payloads, the logical clock itself); anything else makes
    /// replays diverge.
    pub fn log(&mut self, message: impl AsRef<str>) -> Result<()> {
        let message = match &self.prefix {
            Some(prefix) => format!("{} {}", prefix, message.as_ref()),
            None => message.as_ref().to_owned(),
        };
        self.record
            .logs
            .push(LogEntry::new(self.ctx.current_time_millis(), message));
        self.publish()
    }

    /// Transition to a new status.
    ///
    /// Every transition leaves exactly one log entry, so the trail is a
    /// complete account of the status history.
    pub fn set_status(&mut self, new_status: S) -> Result<()> {
        let old_status = self.record.status.to_string();
        self.record.status = new_status;
        let line = format!(
            "Status changed from '{}' to '{}'",
            old_status, self.record.status
        );
        self.log(line)
    }

    /// Finalize the record with the terminal output.
    ///
    /// Clears the custom-status slot (no live snapshot remains
    /// published) and returns the full record, which the workflow must
    /// return to the engine as its result. `None` finalizes without an
    /// output value, e.g. a run that ends on a rejection path.
    pub fn set_output(mut self, output: Option<O>) -> Result<ProgressRecord<O, S>> {
        self.ctx.set_custom_status_raw(None)?;
        self.record.output = output;
        Ok(self.record)
    }

    /// The current status
    pub fn status(&self) -> &S {
        &self.record.status
    }

    /// The accumulated log trail
    pub fn logs(&self) -> &[LogEntry] {
        &self.record.logs
    }

    /// The record as accumulated so far
    pub fn record(&self) -> &ProgressRecord<O, S> {
        &self.record
    }

    fn publish(&self) -> Result<()> {
        let snapshot = serde_json::to_value(&self.record)?;
        self.ctx.set_custom_status_raw(Some(snapshot))
    }
}
