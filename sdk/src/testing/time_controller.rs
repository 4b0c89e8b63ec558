//! Time controller for testing - a logical clock tests can steer.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Controllable logical clock backing mock and in-memory contexts.
///
/// Stands in for the engine's replay-deterministic time accessor: the
/// value only moves when a test (or the environment owning it) says so.
///
/// # Example
///
/// ```ignore
/// use waymark_sdk::testing::TimeController;
/// use std::time::Duration;
///
/// let time = TimeController::with_initial_time(1000);
/// time.advance(Duration::from_secs(5));
/// assert_eq!(time.current_time_millis(), 6000);
/// ```
#[derive(Debug, Clone)]
pub struct TimeController {
    current_time_millis: Arc<RwLock<i64>>,
}

impl Default for TimeController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeController {
    /// Create a new time controller seeded from the system clock.
    pub fn new() -> Self {
        Self::with_initial_time(chrono::Utc::now().timestamp_millis())
    }

    /// Create a new time controller with a specific initial time.
    pub fn with_initial_time(initial_time_millis: i64) -> Self {
        Self {
            current_time_millis: Arc::new(RwLock::new(initial_time_millis)),
        }
    }

    /// Get the current time in milliseconds.
    pub fn current_time_millis(&self) -> i64 {
        *self.current_time_millis.read()
    }

    /// Set the current time to a specific value.
    pub fn set_current_time_millis(&self, time_millis: i64) {
        *self.current_time_millis.write() = time_millis;
    }

    /// Advance time by the given duration.
    pub fn advance(&self, duration: Duration) {
        *self.current_time_millis.write() += duration.as_millis() as i64;
    }
}
