//! Handler for `POST /analyze`.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use snapsolve_core::{AnalysisError, AnalysisResponse, SnapError};
use tracing::{error, info};
use uuid::Uuid;

use crate::server::GatewayState;

/// Shown as a regular result, not an error, so the boundary stays uniform.
const NO_RESPONSE_MESSAGE: &str = "No response from the model";

/// Accepts a multipart image upload, runs it through the inference gateway
/// and the heuristics pipeline, and returns `{"result"}` or `{"error"}`.
pub async fn analyze_image(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Response {
    let request_id = Uuid::new_v4();
    match handle_upload(&state, multipart).await {
        Ok(result) => {
            info!(%request_id, "analysis complete");
            Json(AnalysisResponse { result }).into_response()
        }
        Err(err) => {
            error!(%request_id, error = %err, "analysis failed");
            Json(AnalysisError {
                error: err.to_string(),
            })
            .into_response()
        }
    }
}

async fn handle_upload(
    state: &GatewayState,
    mut multipart: Multipart,
) -> Result<String, SnapError> {
    let data = read_upload(&mut multipart).await?;
    let png = media::reencode_to_png(&data).map_err(|e| SnapError::Ingress(e.to_string()))?;

    match state.inference.analyze(&png).await? {
        Some(raw_text) => Ok(state.pipeline.classify_and_format(raw_text.trim()).await),
        None => Ok(NO_RESPONSE_MESSAGE.to_string()),
    }
}

/// Pull the uploaded file out of the multipart body: the field named
/// `file`, or the first field carrying a filename.
async fn read_upload(multipart: &mut Multipart) -> Result<Bytes, SnapError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SnapError::Ingress(e.to_string()))?
    {
        let is_upload = field.name() == Some("file") || field.file_name().is_some();
        if !is_upload {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SnapError::Ingress(e.to_string()))?;
        if !bytes.is_empty() {
            return Ok(bytes);
        }
    }
    Err(SnapError::Ingress("no file field in upload".to_string()))
}
