//! Progress tracking for long-running workflow executions.
//!
//! A workflow reports incremental status changes, log lines, and an
//! eventual terminal output through a [`tracker::ProgressTracker`]; while
//! the run is live the full record travels through the engine's
//! custom-status slot, and once the run completes it travels through the
//! output channel. [`reader`] reconciles the two into one canonical
//! [`record::ProgressRecord`] for polling callers.

pub mod reader;
pub mod record;
pub mod tracker;
