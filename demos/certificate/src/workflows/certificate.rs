//! Certificate Generation Workflow
//!
//! A linear business process: send the user a one-time redeem code,
//! wait until they supply it back, then render their certificate.
//! Every step reports through the progress tracker, so a polling client
//! can follow the run from the moment it starts.

use crate::activities::{GENERATE_CERTIFICATE_BASE64, SEND_REDEEM_CODE};
use crate::models::{CertificateFile, CertificateInput, CertificateStatus};
use async_trait::async_trait;
use tracing::info;
use waymark_sdk::prelude::*;

/// Workflow kind identifier, shared with the HTTP layer
pub const GENERATE_CERTIFICATE: &str = "generate-certificate";

/// Name of the external event carrying redeem attempts
pub const REDEEM_CODE_ATTEMPT: &str = "redeem-code-attempt";

/// Certificate issuing workflow
pub struct GenerateCertificateWorkflow;

#[async_trait]
impl WorkflowDefinition for GenerateCertificateWorkflow {
    type Input = CertificateInput;
    type Output = ProgressRecord<CertificateFile, CertificateStatus>;

    fn kind(&self) -> &str {
        GENERATE_CERTIFICATE
    }

    fn name(&self) -> &str {
        "Certificate Generation"
    }

    fn version(&self) -> SemanticVersion {
        SemanticVersion::new(1, 0, 0)
    }

    fn description(&self) -> Option<&str> {
        Some("Issues a certificate once the user redeems a one-time code")
    }

    async fn execute(&self, ctx: &dyn WorkflowContext, input: Self::Input) -> Result<Self::Output> {
        let mut progress = ProgressTracker::begin(ctx, CertificateStatus::Started, None)?;

        progress.set_status(CertificateStatus::SendingCode)?;
        progress.log(format!(
            "sending unique redeem code to '{}'",
            input.user_friendly_name
        ))?;
        let code: String = ctx.schedule(SEND_REDEEM_CODE, &input).await?;

        progress.set_status(CertificateStatus::WaitingForRedeem)?;
        progress.log(format!("waiting for user to supply code {}...", code))?;
        let attempt: String = ctx.wait_for_event(REDEEM_CODE_ATTEMPT).await?;

        if attempt != code {
            info!(execution_id = %ctx.workflow_execution_id(), "Redeem code mismatch");
            progress.set_status(CertificateStatus::CodeInvalid)?;
            progress.log(format!("user supplied incorrect code {}", attempt))?;
            return progress.set_output(None);
        }

        progress.set_status(CertificateStatus::Redeemed)?;
        progress.log("code redeemed successfully")?;

        let render_started = ctx.current_time_millis();
        let certificate_base64: String = ctx
            .schedule(GENERATE_CERTIFICATE_BASE64, &input.user_id)
            .await?;
        progress.set_status(CertificateStatus::Generated)?;
        progress.log(format!(
            "certificate generation took {} ms",
            ctx.current_time_millis() - render_started
        ))?;

        progress.set_output(Some(CertificateFile {
            file_name: format!("{} - Certificate.pdf", input.user_friendly_name),
            file_data: certificate_base64,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_kind() {
        let workflow = GenerateCertificateWorkflow;
        assert_eq!(workflow.kind(), "generate-certificate");
    }

    #[test]
    fn test_workflow_version() {
        let workflow = GenerateCertificateWorkflow;
        assert_eq!(workflow.version(), SemanticVersion::new(1, 0, 0));
    }

    #[test]
    fn test_workflow_schemas() {
        let workflow = GenerateCertificateWorkflow;
        assert!(workflow.input_schema().is_some());
        assert!(workflow.output_schema().is_some());
    }
}
