//! Activities invoked by the certificate workflow

mod generate_certificate;
mod send_redeem_code;

pub use generate_certificate::{GenerateCertificateActivity, GENERATE_CERTIFICATE_BASE64};
pub use send_redeem_code::{SendRedeemCodeActivity, SEND_REDEEM_CODE};
