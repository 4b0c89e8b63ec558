//! Certificate Issuing Demo
//!
//! Runs the certificate workflow on the in-memory engine behind a small
//! HTTP API:
//!
//! 1. `POST /certificates` starts a run and returns its instance id
//! 2. `POST /certificates/{id}/redeem` supplies the redeem code
//! 3. `GET /certificates/{id}` polls progress; once generated, the
//!    response is the certificate PDF itself

pub mod activities;
pub mod http;
pub mod models;
pub mod workflows;

use activities::{GenerateCertificateActivity, SendRedeemCodeActivity};
use std::sync::Arc;
use tracing::info;
use waymark_sdk::testing::InMemoryEngine;
use workflows::GenerateCertificateWorkflow;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting certificate demo");

    let engine = Arc::new(InMemoryEngine::new());
    engine.register_workflow(GenerateCertificateWorkflow)?;
    engine.register_activity(SendRedeemCodeActivity)?;
    engine.register_activity(GenerateCertificateActivity)?;

    let addr =
        std::env::var("CERTIFICATE_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let router = http::create_router(http::AppState { engine });
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
