//! ActivityDefinition trait

use crate::activity::context::ActivityContext;
use crate::common::version::SemanticVersion;
use crate::error::Result;
use crate::workflow::definition::generate_schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Definition of an activity with typed input and output
#[async_trait]
pub trait ActivityDefinition: Send + Sync {
    /// Input type for the activity
    type Input: Serialize + DeserializeOwned + JsonSchema + Send;
    /// Output type for the activity
    type Output: Serialize + DeserializeOwned + JsonSchema + Send;

    /// Unique identifier for this activity type
    fn kind(&self) -> &str;

    /// Execute the activity with the given input and context
    async fn execute(&self, input: Self::Input, ctx: &dyn ActivityContext) -> Result<Self::Output>;

    /// Human-readable name for the activity (defaults to kind)
    fn name(&self) -> &str {
        self.kind()
    }

    /// Version of this activity definition
    fn version(&self) -> SemanticVersion {
        SemanticVersion::default()
    }

    /// Optional description of the activity
    fn description(&self) -> Option<&str> {
        None
    }

    /// Timeout in seconds for activity execution (None = engine default)
    fn timeout_seconds(&self) -> Option<u32> {
        None
    }

    /// JSON Schema for activity input validation.
    fn input_schema(&self) -> Option<Value> {
        Some(generate_schema::<Self::Input>())
    }

    /// JSON Schema for activity output validation.
    fn output_schema(&self) -> Option<Value> {
        Some(generate_schema::<Self::Output>())
    }
}
