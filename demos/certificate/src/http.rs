//! HTTP front end for the certificate demo
//!
//! Start a run, redeem the code, and poll progress. The engine is the
//! in-memory one; the handlers only ever touch the client surface.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;
use waymark_sdk::testing::InMemoryEngine;
use waymark_sdk::{
    ProgressRecord, WaymarkError, WorkflowEngineClient, WorkflowEngineClientExt,
};

use crate::models::{CertificateFile, CertificateInput, CertificateStatus, RedeemRequest};
use crate::workflows::{GENERATE_CERTIFICATE, REDEEM_CODE_ATTEMPT};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InMemoryEngine>,
}

/// Create the demo router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/certificates", post(start_certificate))
        .route("/certificates/:id/redeem", post(redeem_code))
        .route("/certificates/:id", get(certificate_progress))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ProgressQuery {
    /// Return only the formatted log trail
    #[serde(default)]
    logs_only: bool,
}

async fn start_certificate(
    State(state): State<AppState>,
    Json(input): Json<CertificateInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let execution_id = state
        .engine
        .start_workflow_typed(GENERATE_CERTIFICATE, &input)
        .await?;
    Ok(Json(json!({ "workflow_instance_id": execution_id })))
}

async fn redeem_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RedeemRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .engine
        .raise_event_typed(id, REDEEM_CODE_ATTEMPT, &request.code)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

async fn certificate_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ProgressQuery>,
) -> Result<Response, ApiError> {
    let workflow_state = state.engine.get_workflow_state(id).await?;
    let record: ProgressRecord<CertificateFile, CertificateStatus> = workflow_state.progress()?;

    if query.logs_only {
        let logs: Vec<String> = record
            .logs
            .iter()
            .map(|entry| format!("{} {}", entry.timestamp_millis, entry.message))
            .collect();
        return Ok(Json(json!({ "logs": logs })).into_response());
    }

    if record.status == CertificateStatus::Generated {
        if let Some(file) = &record.output {
            return Ok(pdf_response(file)?);
        }
    }

    Ok(Json(serde_json::to_value(&record).map_err(WaymarkError::Serialization)?).into_response())
}

fn pdf_response(file: &CertificateFile) -> Result<Response, ApiError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&file.file_data)
        .map_err(|err| {
            WaymarkError::Other(format!("stored certificate is not valid base64: {}", err))
        })?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Maps SDK errors onto HTTP responses
pub struct ApiError(WaymarkError);

impl<E: Into<WaymarkError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WaymarkError::ExecutionNotFound(_) | WaymarkError::WorkflowNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            WaymarkError::ExecutionFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "There was an error during the certificate process. Seek support".to_string(),
            ),
            WaymarkError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };

        warn!(status = %status, error = %self.0, "Request failed");
        (status, Json(json!({ "error": message }))).into_response()
    }
}
