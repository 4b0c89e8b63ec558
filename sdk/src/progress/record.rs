//! Progress record and log entry types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of the progress trail.
///
/// The timestamp is logical engine time in milliseconds, so a replayed
/// execution reproduces identical entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LogEntry {
    /// Logical time the entry was appended, in milliseconds
    pub timestamp_millis: i64,
    /// Log message, including any configured prefix
    pub message: String,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(timestamp_millis: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp_millis,
            message: message.into(),
        }
    }
}

/// Snapshot of one execution's visible progress.
///
/// `status` is always present and mutable until `output` is set;
/// `logs` is append-only and ordered by logical time. The same shape is
/// carried through the custom-status slot while the run is live and
/// through the output channel once it completes, so polling callers
/// never special-case the run state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound(deserialize = "O: Deserialize<'de>, S: Deserialize<'de>"))]
pub struct ProgressRecord<O, S> {
    /// Terminal output, present only once the workflow finalizes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<O>,
    /// Current domain-defined status
    pub status: S,
    /// Chronological log trail
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl<O, S> ProgressRecord<O, S> {
    /// Create a record with the given status and no logs or output
    pub fn with_status(status: S) -> Self {
        Self {
            output: None,
            status,
            logs: Vec::new(),
        }
    }

    /// The record of an execution that exists but has published nothing
    /// yet: default status, no output, empty trail.
    pub fn empty() -> Self
    where
        S: Default,
    {
        Self::with_status(S::default())
    }

    /// Whether the record carries a terminal output
    pub fn is_final(&self) -> bool {
        self.output.is_some()
    }
}

impl<O, S: Default> Default for ProgressRecord<O, S> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record() {
        let record: ProgressRecord<String, String> = ProgressRecord::empty();
        assert!(record.output.is_none());
        assert_eq!(record.status, "");
        assert!(record.logs.is_empty());
        assert!(!record.is_final());
    }

    #[test]
    fn test_output_omitted_when_absent() {
        let record: ProgressRecord<String, String> =
            ProgressRecord::with_status("Running".to_string());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"status": "Running", "logs": []}));
    }

    #[test]
    fn test_output_serialized_when_present() {
        let record = ProgressRecord {
            output: Some("done".to_string()),
            status: "Finished".to_string(),
            logs: vec![LogEntry::new(42, "wrapped up")],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "output": "done",
                "status": "Finished",
                "logs": [{"timestamp_millis": 42, "message": "wrapped up"}],
            })
        );
    }

    #[test]
    fn test_roundtrip_without_output() {
        let record: ProgressRecord<String, String> = serde_json::from_value(json!({
            "status": "Running",
            "logs": [{"timestamp_millis": 1, "message": "started"}],
        }))
        .unwrap();
        assert!(record.output.is_none());
        assert_eq!(record.logs.len(), 1);
    }

    #[test]
    fn test_missing_logs_deserialize_empty() {
        let record: ProgressRecord<String, String> =
            serde_json::from_value(json!({"status": "Running"})).unwrap();
        assert!(record.logs.is_empty());
    }
}
