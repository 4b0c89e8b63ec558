//! Send Redeem Code Activity
//!
//! Simulates delivering a one-time code to the end user over email/SMS.

use crate::models::CertificateInput;
use async_trait::async_trait;
use rand::Rng;
use tracing::info;
use waymark_sdk::prelude::*;

/// Activity kind identifier
pub const SEND_REDEEM_CODE: &str = "send-redeem-code";

/// Activity that delivers a redeem code and returns it for later
/// verification. Activities may be nondeterministic; the workflow only
/// ever sees the recorded result.
pub struct SendRedeemCodeActivity;

#[async_trait]
impl ActivityDefinition for SendRedeemCodeActivity {
    type Input = CertificateInput;
    type Output = String;

    fn kind(&self) -> &str {
        SEND_REDEEM_CODE
    }

    fn name(&self) -> &str {
        "Send Redeem Code"
    }

    fn description(&self) -> Option<&str> {
        Some("Delivers a one-time redeem code to the user")
    }

    fn timeout_seconds(&self) -> Option<u32> {
        Some(60)
    }

    async fn execute(&self, input: Self::Input, ctx: &dyn ActivityContext) -> Result<Self::Output> {
        // Stand-in for calling a delivery service
        let code = format!("{:04}", rand::thread_rng().gen_range(0..10_000u32));

        info!(
            user_id = %input.user_id,
            attempt = ctx.attempt(),
            "Sent redeem code to user"
        );

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_metadata() {
        let activity = SendRedeemCodeActivity;
        assert_eq!(activity.kind(), "send-redeem-code");
        assert_eq!(activity.timeout_seconds(), Some(60));
    }
}
