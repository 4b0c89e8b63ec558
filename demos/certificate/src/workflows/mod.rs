//! Workflow definitions for the certificate demo

mod certificate;

pub use certificate::{GenerateCertificateWorkflow, GENERATE_CERTIFICATE, REDEEM_CODE_ATTEMPT};
