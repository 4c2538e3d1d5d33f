use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::ocr::{PdftoppmRasterizer, TesseractEngine};
use super::pdf::{PdfExtractTextLayer, PdfTextExtractor};
use super::types::{Document, ExtractedText};
use super::{word, ExtractionError};

/// Document kind, chosen from the file name suffix only. No content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
            Ok(DocumentKind::Word)
        } else {
            Err(ExtractionError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Dispatches a document to the extractor registered for its kind.
pub struct DocumentDecoder {
    pdf: PdfTextExtractor,
}

impl DocumentDecoder {
    pub fn new(pdf: PdfTextExtractor) -> Self {
        Self { pdf }
    }

    /// Production wiring: pdf-extract text layer, pdftoppm, tesseract.
    pub fn with_system_tools(ocr_dpi: u32, ocr_language: &str, tool_timeout: Duration) -> Self {
        Self::new(PdfTextExtractor::new(
            Arc::new(PdfExtractTextLayer),
            Arc::new(PdftoppmRasterizer::new(tool_timeout)),
            Arc::new(TesseractEngine::new(ocr_language, tool_timeout)),
            ocr_dpi,
        ))
    }

    pub async fn extract_text(&self, document: Document) -> Result<ExtractedText, ExtractionError> {
        let kind = DocumentKind::from_file_name(&document.file_name)?;
        info!(
            file_name = %document.file_name,
            bytes = document.bytes.len(),
            ?kind,
            "Extracting document text"
        );

        match kind {
            DocumentKind::Pdf => self.pdf.extract(document.bytes).await,
            DocumentKind::Word => word::extract(document.bytes).await,
        }
    }
}
