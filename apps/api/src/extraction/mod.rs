// Document text extraction: file-name dispatch, PDF text layer with OCR
// fallback, and Word paragraphs. Nothing here is persisted.

pub mod decoder;
pub mod handlers;
pub mod ocr;
pub mod pdf;
pub mod types;
pub mod word;

pub use decoder::DocumentDecoder;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF rasterization failed: {0}")]
    Rasterization(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Word document parsing failed: {0}")]
    WordParsing(String),

    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: &'static str, reason: String },

    #[error("{tool} timed out after {after:?}")]
    Timeout { tool: &'static str, after: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
