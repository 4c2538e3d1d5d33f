use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Malformed model output never becomes an `AppError`; it is recovered inside
/// the analysis components. Model transport failures are mapped per stage in
/// `analysis::orchestrator::run_stage`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text: {0}")]
    Extraction(String),

    #[error("Upstream service error: {0}")]
    UpstreamService(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(name) => AppError::UnsupportedFormat(name),
            ExtractionError::Timeout { .. } => AppError::Timeout(err.to_string()),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::UnsupportedFormat(name) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format: '{name}'. Upload a .pdf, .doc or .docx file"),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    self.to_string(),
                )
            }
            AppError::UpstreamService(msg) => {
                tracing::error!("Upstream service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_SERVICE_ERROR",
                    "The language model service is unavailable".to_string(),
                )
            }
            AppError::Timeout(msg) => {
                tracing::error!("Timeout: {msg}");
                (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", self.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_bad_request() {
        let err: AppError = ExtractionError::UnsupportedFormat("a.txt".into()).into();
        assert!(matches!(err, AppError::UnsupportedFormat(ref n) if n == "a.txt"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_extraction_fault_carries_error_marker() {
        let err: AppError = ExtractionError::PdfParsing("bad xref".into()).into();
        assert!(err.to_string().starts_with("Error extracting text"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_timeouts_map_to_gateway_timeout() {
        let err: AppError = ExtractionError::Timeout {
            tool: "tesseract",
            after: std::time::Duration::from_secs(1),
        }
        .into();
        assert!(matches!(err, AppError::Timeout(_)));
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_upstream_error_hides_details() {
        let response = AppError::UpstreamService("503 overloaded".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
