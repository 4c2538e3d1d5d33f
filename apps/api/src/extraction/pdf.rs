//! PDF text extraction with OCR fallback.
//!
//! Order is fixed and short-circuiting:
//! 1. native text layer, pages joined by `\n`, trimmed
//! 2. only if that is empty: rasterize every page, OCR each image once,
//!    join the per-page outputs with single spaces
//!
//! A decoding failure in either stage is returned as `ExtractionError`.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use super::types::{ExtractedText, ExtractionMethod, OcrEngine, PageRasterizer, PdfTextLayer};
use super::ExtractionError;

/// Text layer parser backed by the pdf-extract crate.
pub struct PdfExtractTextLayer;

impl PdfTextLayer for PdfExtractTextLayer {
    fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
    }
}

pub struct PdfTextExtractor {
    text_layer: Arc<dyn PdfTextLayer>,
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
    dpi: u32,
}

impl PdfTextExtractor {
    pub fn new(
        text_layer: Arc<dyn PdfTextLayer>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
        dpi: u32,
    ) -> Self {
        Self {
            text_layer,
            rasterizer,
            ocr,
            dpi,
        }
    }

    pub async fn extract(&self, pdf_bytes: Bytes) -> Result<ExtractedText, ExtractionError> {
        let text = self.text_layer_text(pdf_bytes.clone()).await?;
        if !text.is_empty() {
            debug!(chars = text.len(), "PDF text layer extracted");
            return Ok(ExtractedText::new(text, ExtractionMethod::TextLayer));
        }

        info!(dpi = self.dpi, "PDF has no text layer, falling back to OCR");
        let pages = self.rasterizer.rasterize(&pdf_bytes, self.dpi).await?;

        let mut page_texts = Vec::with_capacity(pages.len());
        for page in &pages {
            let recognized = self.ocr.recognize(page).await?;
            debug!(
                page = page.page_number,
                chars = recognized.len(),
                "OCR page complete"
            );
            page_texts.push(recognized.trim().to_string());
        }

        let text = page_texts.join(" ").trim().to_string();
        info!(pages = pages.len(), chars = text.len(), "OCR extraction complete");
        Ok(ExtractedText::new(text, ExtractionMethod::Ocr))
    }

    /// Runs the text-layer parser on the blocking pool. A panic inside the
    /// parser surfaces as `PdfParsing` instead of taking the worker down.
    async fn text_layer_text(&self, pdf_bytes: Bytes) -> Result<String, ExtractionError> {
        let layer = Arc::clone(&self.text_layer);
        let pages = tokio::task::spawn_blocking(move || layer.page_texts(&pdf_bytes))
            .await
            .map_err(|e| ExtractionError::PdfParsing(format!("text layer parser aborted: {e}")))??;

        Ok(pages.join("\n").trim().to_string())
    }
}



#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::fakes::{extractor, FakeOcr, FakeRasterizer, FakeTextLayer};
    use super::fixtures::make_test_pdf;
    use super::*;

    #[tokio::test]
    async fn test_text_layer_skips_ocr() {
        let layer = Arc::new(FakeTextLayer::with_pages(&["  Rust engineer ", "Tokio, Axum\n"]));
        let rasterizer = Arc::new(FakeRasterizer::new(2));
        let ocr = Arc::new(FakeOcr::new(&["never", "used"]));
        let pdf = extractor(layer, rasterizer.clone(), ocr.clone());

        let extracted = pdf.extract(Bytes::from_static(b"%PDF")).await.unwrap();

        assert_eq!(extracted.text, "Rust engineer \nTokio, Axum");
        assert_eq!(extracted.method, ExtractionMethod::TextLayer);
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_text_layer_runs_ocr_once_per_page() {
        let layer = Arc::new(FakeTextLayer::with_pages(&["", "  \n", ""]));
        let rasterizer = Arc::new(FakeRasterizer::new(3));
        let ocr = Arc::new(FakeOcr::new(&["Page one\n", "Page two", "Page three"]));
        let pdf = extractor(layer, rasterizer.clone(), ocr.clone());

        let extracted = pdf.extract(Bytes::from_static(b"%PDF")).await.unwrap();

        assert_eq!(extracted.text, "Page one Page two Page three");
        assert_eq!(extracted.method, ExtractionMethod::Ocr);
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_ocr_producing_nothing_is_empty_not_error() {
        let layer = Arc::new(FakeTextLayer::with_pages(&[""]));
        let rasterizer = Arc::new(FakeRasterizer::new(1));
        let ocr = Arc::new(FakeOcr::new(&["   "]));
        let pdf = extractor(layer, rasterizer, ocr);

        let extracted = pdf.extract(Bytes::from_static(b"%PDF")).await.unwrap();
        assert!(extracted.text.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_text_layer_is_reported_without_ocr() {
        let layer = Arc::new(FakeTextLayer::corrupt("bad xref table"));
        let rasterizer = Arc::new(FakeRasterizer::new(1));
        let ocr = Arc::new(FakeOcr::new(&["text"]));
        let pdf = extractor(layer, rasterizer.clone(), ocr);

        let err = pdf.extract(Bytes::from_static(b"garbage")).await.unwrap_err();

        assert!(matches!(err, ExtractionError::PdfParsing(ref m) if m.contains("bad xref")));
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ocr_engine_failure_is_reported() {
        let layer = Arc::new(FakeTextLayer::with_pages(&["", ""]));
        let rasterizer = Arc::new(FakeRasterizer::new(2));
        let ocr = Arc::new(FakeOcr::new(&["ok", "boom"]).failing_on(2));
        let pdf = extractor(layer, rasterizer, ocr);

        let err = pdf.extract(Bytes::from_static(b"%PDF")).await.unwrap_err();
        assert!(matches!(err, ExtractionError::OcrProcessing(_)));
    }

    #[test]
    fn test_pdf_extract_reads_text_layer() {
        let pages = PdfExtractTextLayer
            .page_texts(&make_test_pdf(Some("Senior Rust Engineer")))
            .unwrap();
        let full_text = pages.join("\n");
        assert!(
            full_text.contains("Senior") || full_text.contains("Rust"),
            "expected drawn text in layer, got: {full_text}"
        );
    }

    #[test]
    fn test_pdf_extract_rejects_non_pdf() {
        assert!(PdfExtractTextLayer.page_texts(b"not a pdf").is_err());
    }

    #[tokio::test]
    async fn test_real_text_layer_is_idempotent() {
        let bytes = Bytes::from(make_test_pdf(Some("Kubernetes and Terraform")));
        let pdf = PdfTextExtractor::new(
            Arc::new(PdfExtractTextLayer),
            Arc::new(FakeRasterizer::new(1)),
            Arc::new(FakeOcr::new(&["unused"])),
            300,
        );

        let first = pdf.extract(bytes.clone()).await.unwrap();
        let second = pdf.extract(bytes).await.unwrap();

        assert_eq!(first.method, ExtractionMethod::TextLayer);
        assert_eq!(first.text.as_bytes(), second.text.as_bytes());
    }

    #[tokio::test]
    async fn test_page_without_text_falls_back_to_ocr() {
        let rasterizer = Arc::new(FakeRasterizer::new(1));
        let ocr = Arc::new(FakeOcr::new(&["Scanned resume"]));
        let pdf = PdfTextExtractor::new(
            Arc::new(PdfExtractTextLayer),
            rasterizer.clone(),
            ocr.clone(),
            300,
        );

        let extracted = pdf.extract(Bytes::from(make_test_pdf(None))).await.unwrap();

        assert_eq!(extracted.text, "Scanned resume");
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
    }
}
