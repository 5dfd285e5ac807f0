//! Upload handler (`POST /api/upload`).
//!
//! Stages the multipart `file` field on scratch storage, invokes the
//! extraction client exactly once, shapes the response, and relies on the
//! [`TempUpload`] guard for cleanup on every exit path.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use firlens_core::FirlensError;

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::temp::TempUpload;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub file_size: usize,
    pub extracted_data: Value,
    pub raw_urdu_text: String,
    pub corrected_urdu_text: String,
    pub fir_structured_data: Value,
    pub corrections_applied: bool,
    pub correction_stats: Value,
    pub timestamp: String,
    pub extraction_type: String,
    pub credit_info: Value,
}

/// Handler for `POST /api/upload`.
pub async fn upload_file(
    State(state): State<Arc<GatewayState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FirlensError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| FirlensError::InvalidRequest(e.to_string()))?;
        upload = Some((filename, content));
        break;
    }

    let (filename, content) =
        upload.ok_or_else(|| FirlensError::InvalidRequest("No file provided".to_string()))?;

    info!(filename = %filename, size = content.len(), "received upload");

    // The guard owns the staged file until the response is built; dropping
    // it deletes the file on success and on every error path below.
    let staged = TempUpload::write(&state.upload_dir, &filename, &content).await?;
    let abs_path = staged.absolute_path().await?;

    // The single extraction call for this upload. Never retried.
    let document = state.extractor.extract(&abs_path).await?;

    let raw_text = document.raw_text().to_string();
    Ok(Json(UploadResponse {
        filename,
        file_size: content.len(),
        raw_urdu_text: raw_text.clone(),
        // The agent already handles corrections; nothing happens locally.
        corrected_urdu_text: raw_text,
        fir_structured_data: document.structured_data(),
        extracted_data: document.into_value(),
        corrections_applied: false,
        correction_stats: json!({
            "note": "Configure your LlamaCloud agent to handle spell/grammar corrections",
            "agent_handles_correction": true,
        }),
        timestamp: Utc::now().to_rfc3339(),
        extraction_type: "structured_fir".to_string(),
        credit_info: json!({
            "agent_calls": 1,
            "spell_checker": "Agent handles everything",
            "expected_credits": "~20 credits (agent does both extraction + correction)",
        }),
    }))
}
