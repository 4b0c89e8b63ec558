//! Generate Certificate Activity
//!
//! Renders the certificate PDF and returns it base64-encoded, the shape
//! the workflow carries in its terminal output.

use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;
use tracing::info;
use waymark_sdk::prelude::*;

/// Activity kind identifier
pub const GENERATE_CERTIFICATE_BASE64: &str = "generate-certificate-base64";

/// Activity that renders a one-page certificate PDF for a user
pub struct GenerateCertificateActivity;

#[async_trait]
impl ActivityDefinition for GenerateCertificateActivity {
    type Input = String;
    type Output = String;

    fn kind(&self) -> &str {
        GENERATE_CERTIFICATE_BASE64
    }

    fn name(&self) -> &str {
        "Generate Certificate"
    }

    fn description(&self) -> Option<&str> {
        Some("Renders the certificate PDF, base64-encoded")
    }

    fn timeout_seconds(&self) -> Option<u32> {
        Some(120)
    }

    async fn execute(&self, user_id: Self::Input, ctx: &dyn ActivityContext) -> Result<Self::Output> {
        // Simulate a slow rendering backend
        tokio::time::sleep(Duration::from_millis(150)).await;

        let pdf = render_certificate_pdf(&user_id);

        info!(
            user_id = %user_id,
            bytes = pdf.len(),
            attempt = ctx.attempt(),
            "Rendered certificate"
        );

        Ok(base64::engine::general_purpose::STANDARD.encode(pdf))
    }
}

/// Assemble a minimal one-page PDF with the certificate line.
fn render_certificate_pdf(user_id: &str) -> Vec<u8> {
    // Parentheses and backslashes would break the PDF string literal
    let safe_id: String = user_id
        .chars()
        .map(|c| if matches!(c, '(' | ')' | '\\') { '_' } else { c })
        .collect();
    let content = format!("BT /F1 18 Tf 72 540 Td (Certificate of Completion: {}) Tj ET", safe_id);

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, body));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    pdf.into_bytes()
}
