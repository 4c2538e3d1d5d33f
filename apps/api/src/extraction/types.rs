use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use super::ExtractionError;

/// An uploaded document: the declared file name plus its raw bytes.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Which path produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
    Word,
}

/// Trimmed plain text of a document. An empty string is a valid result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            text: text.into(),
            method,
        }
    }
}

/// One rasterized PDF page, PNG-encoded.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-based
    pub page_number: usize,
    pub png: Vec<u8>,
}

/// Native text-layer parser. CPU-bound; callers run it on the blocking pool.
pub trait PdfTextLayer: Send + Sync {
    fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Renders every page of a PDF to an image at the given resolution.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(&self, pdf_bytes: &[u8], dpi: u32)
        -> Result<Vec<PageImage>, ExtractionError>;
}

/// Optical character recognition over a single page image.
/// A failed recognition is an error, never a silent empty string.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &PageImage) -> Result<String, ExtractionError>;
}
