//! Progress reader - one canonical record regardless of run state

use crate::client::state::WorkflowState;
use crate::error::{Result, WaymarkError};
use crate::progress::record::ProgressRecord;
use serde::de::DeserializeOwned;

impl WorkflowState {
    /// Reconcile this snapshot into one canonical [`ProgressRecord`].
    ///
    /// - completed: the record is read from the output channel;
    /// - failed: returns [`WaymarkError::ExecutionFailed`]; a fault is
    ///   a distinct outcome, never synthesized into a record from a
    ///   possibly-absent output;
    /// - otherwise: the latest custom-status snapshot if one has been
    ///   published, else an empty record (default status, no output,
    ///   no logs).
    ///
    /// The returned record has the same shape in every non-failed case,
    /// so callers never branch on the run state.
    pub fn progress<O, S>(&self) -> Result<ProgressRecord<O, S>>
    where
        O: DeserializeOwned,
        S: DeserializeOwned + Default,
    {
        if self.has_failed() {
            return Err(WaymarkError::ExecutionFailed {
                execution_id: self.execution_id.to_string(),
                error: self
                    .error
                    .clone()
                    .unwrap_or_else(|| "no failure detail recorded".to_string()),
            });
        }

        if self.is_completed() {
            let output = self.output.clone().ok_or_else(|| {
                WaymarkError::Other(format!(
                    "completed execution {} has no recorded output",
                    self.execution_id
                ))
            })?;
            return serde_json::from_value(output).map_err(WaymarkError::Serialization);
        }

        match &self.custom_status {
            Some(snapshot) => {
                serde_json::from_value(snapshot.clone()).map_err(WaymarkError::Serialization)
            }
            None => Ok(ProgressRecord::empty()),
        }
    }
}
