//! WorkflowDefinition trait

use crate::common::version::SemanticVersion;
use crate::error::Result;
use crate::workflow::context::WorkflowContext;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Definition of a workflow with typed input and output.
///
/// Input and output types must implement `JsonSchema` to enable
/// automatic schema generation.
#[async_trait]
pub trait WorkflowDefinition: Send + Sync {
    /// Input type for the workflow
    type Input: Serialize + DeserializeOwned + JsonSchema + Send;
    /// Output type for the workflow
    type Output: Serialize + DeserializeOwned + JsonSchema + Send;

    /// Unique identifier for this workflow type
    fn kind(&self) -> &str;

    /// Execute the workflow with the given context and input
    async fn execute(&self, ctx: &dyn WorkflowContext, input: Self::Input) -> Result<Self::Output>;

    /// Human-readable name for the workflow (defaults to kind)
    fn name(&self) -> &str {
        self.kind()
    }

    /// Version of this workflow definition
    fn version(&self) -> SemanticVersion {
        SemanticVersion::default()
    }

    /// Optional description of the workflow
    fn description(&self) -> Option<&str> {
        None
    }

    /// JSON Schema for workflow input validation.
    /// Default: auto-generated from Input type.
    fn input_schema(&self) -> Option<Value> {
        Some(generate_schema::<Self::Input>())
    }

    /// JSON Schema for workflow output validation.
    /// Default: auto-generated from Output type.
    fn output_schema(&self) -> Option<Value> {
        Some(generate_schema::<Self::Output>())
    }
}

/// Generate a JSON Schema from a type that implements JsonSchema.
pub fn generate_schema<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct EnrollInput {
        /// The member being enrolled (required string)
        member_id: String,
        /// Optional referral code
        referral_code: Option<String>,
        /// Whether to send a welcome mail
        send_welcome: bool,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct EnrollOutput {
        accepted: bool,
    }

    struct EnrollWorkflow;

    #[async_trait]
    impl WorkflowDefinition for EnrollWorkflow {
        type Input = EnrollInput;
        type Output = EnrollOutput;

        fn kind(&self) -> &str {
            "enroll-member"
        }

        fn version(&self) -> SemanticVersion {
            SemanticVersion::new(2, 1, 0)
        }

        fn description(&self) -> Option<&str> {
            Some("Enrolls a member")
        }

        async fn execute(
            &self,
            _ctx: &dyn WorkflowContext,
            _input: Self::Input,
        ) -> Result<Self::Output> {
            Ok(EnrollOutput { accepted: true })
        }
    }

    #[test]
    fn test_name_defaults_to_kind() {
        let workflow = EnrollWorkflow;
        assert_eq!(workflow.name(), "enroll-member");
    }

    #[test]
    fn test_version_override() {
        let workflow = EnrollWorkflow;
        assert_eq!(workflow.version(), SemanticVersion::new(2, 1, 0));
    }

    #[test]
    fn test_generate_schema_has_properties() {
        let schema = generate_schema::<EnrollInput>();
        let properties = schema
            .get("properties")
            .expect("Schema should have properties");

        assert!(properties.get("member_id").is_some());
        assert!(properties.get("referral_code").is_some());
        assert!(properties.get("send_welcome").is_some());
    }

    #[test]
    fn test_generate_schema_required_fields() {
        let schema = generate_schema::<EnrollInput>();
        let required = schema
            .get("required")
            .expect("Schema should have required array");
        let required: Vec<&str> = required
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert!(required.contains(&"member_id"));
        assert!(required.contains(&"send_welcome"));
        // referral_code is Option and must not be required
        assert!(!required.contains(&"referral_code"));
    }

    #[test]
    fn test_definition_schemas_present() {
        let workflow = EnrollWorkflow;
        assert!(workflow.input_schema().is_some());
        assert!(workflow.output_schema().is_some());
    }
}
