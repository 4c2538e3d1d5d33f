//! Axum route handlers for document text extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::types::{Document, ExtractionMethod};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    #[serde(default)]
    pub file_name: String,
    /// Base64-encoded file contents.
    #[serde(default)]
    pub file_data: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadExtractResponse {
    pub file_name: String,
    pub text: String,
    pub method: ExtractionMethod,
}

/// POST /extract-text
///
/// JSON body with a base64 payload, as sent by the mobile client.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(request): Json<ExtractTextRequest>,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let bytes = BASE64
        .decode(request.file_data.trim())
        .map_err(|e| AppError::Validation(format!("file_data is not valid base64: {e}")))?;

    let extracted = state
        .decoder
        .extract_text(Document::new(request.file_name, bytes))
        .await?;

    Ok(Json(ExtractTextResponse {
        text: extracted.text,
    }))
}

/// POST /api/v1/documents/extract
///
/// Multipart upload; the document is read from the `file` field.
pub async fn handle_upload_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadExtractResponse>, AppError> {
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        document = Some(Document::new(file_name, bytes));
        break;
    }

    let document = document
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    let file_name = document.file_name.clone();
    let extracted = state.decoder.extract_text(document).await?;

    Ok(Json(UploadExtractResponse {
        file_name,
        text: extracted.text,
        method: extracted.method,
    }))
}
