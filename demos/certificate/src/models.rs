//! Data model for the certificate issuing process

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input to the certificate workflow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CertificateInput {
    /// Display name printed on the certificate
    pub user_friendly_name: String,
    /// Stable identifier of the user
    pub user_id: String,
}

/// Terminal output of the certificate workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CertificateFile {
    /// Suggested download file name
    pub file_name: String,
    /// Base64-encoded PDF bytes
    pub file_data: String,
}

/// Business status of the certificate process.
///
/// `Display` must render the same names serde writes; the progress
/// trail quotes these in its transition lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum CertificateStatus {
    #[default]
    Started,
    SendingCode,
    WaitingForRedeem,
    CodeInvalid,
    Redeemed,
    Generated,
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CertificateStatus::Started => "Started",
            CertificateStatus::SendingCode => "SendingCode",
            CertificateStatus::WaitingForRedeem => "WaitingForRedeem",
            CertificateStatus::CodeInvalid => "CodeInvalid",
            CertificateStatus::Redeemed => "Redeemed",
            CertificateStatus::Generated => "Generated",
        };
        f.write_str(name)
    }
}

/// Body of the redeem endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}
