//! Health check and CSV upload handlers.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};
use sifter::AnalysisResult;
use tracing::{debug, info};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// GET /ping - Liveness check.
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}

/// POST /analyze-csv - Run every check on an uploaded CSV file.
pub async fn analyze_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        upload = Some((name, bytes));
        break;
    }

    let (name, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;
    debug!(file = %name, bytes = bytes.len(), "received upload");

    let sifter = state.sifter.clone();
    let result =
        tokio::task::spawn_blocking(move || sifter.analyze_bytes(&bytes, &name)).await??;

    info!(
        file = %result.source.file,
        flagged = result.issues.flagged_checks().len(),
        "upload analyzed"
    );
    Ok(Json(result))
}
