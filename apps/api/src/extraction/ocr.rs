//! Rasterizer and OCR engine backed by poppler's `pdftoppm` and the
//! `tesseract` CLI. Both run as subprocesses bounded by a timeout and are
//! killed if the timeout fires.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::types::{OcrEngine, PageImage, PageRasterizer};
use super::ExtractionError;

pub struct PdftoppmRasterizer {
    timeout: Duration,
}

impl PdftoppmRasterizer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PageRasterizer for PdftoppmRasterizer {
    async fn rasterize(
        &self,
        pdf_bytes: &[u8],
        dpi: u32,
    ) -> Result<Vec<PageImage>, ExtractionError> {
        let temp_dir = tempfile::tempdir()?;
        let input_path = temp_dir.path().join("input.pdf");
        tokio::fs::write(&input_path, pdf_bytes).await?;

        let mut command = Command::new("pdftoppm");
        command
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg(&input_path)
            .arg(temp_dir.path().join("page"));

        let output = run_tool(command, "pdftoppm", self.timeout).await?;
        if !output.status.success() {
            return Err(ExtractionError::Rasterization(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // pdftoppm zero-pads page numbers, so lexical order is page order.
        let mut image_paths: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        image_paths.sort();

        if image_paths.is_empty() {
            return Err(ExtractionError::Rasterization(
                "pdftoppm produced no images".to_string(),
            ));
        }

        let mut pages = Vec::with_capacity(image_paths.len());
        for (i, path) in image_paths.iter().enumerate() {
            pages.push(PageImage {
                page_number: i + 1,
                png: tokio::fs::read(path).await?,
            });
        }

        debug!(pages = pages.len(), dpi, "Rasterized PDF");
        Ok(pages)
    }
}

pub struct TesseractEngine {
    language: String,
    timeout: Duration,
}

impl TesseractEngine {
    pub fn new(language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            language: language.into(),
            timeout,
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &PageImage) -> Result<String, ExtractionError> {
        let image_file = tempfile::Builder::new()
            .prefix("page-")
            .suffix(".png")
            .tempfile()?;
        tokio::fs::write(image_file.path(), &image.png).await?;

        let mut command = Command::new("tesseract");
        command
            .arg(image_file.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language);

        let output = run_tool(command, "tesseract", self.timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(page = image.page_number, "tesseract failed: {}", stderr.trim());
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with {} on page {}: {}",
                output.status,
                image.page_number,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Runs a subprocess to completion within `limit`. The child is killed when
/// the timeout drops the pending future.
async fn run_tool(
    mut command: Command,
    tool: &'static str,
    limit: Duration,
) -> Result<Output, ExtractionError> {
    command.kill_on_drop(true);
    match tokio::time::timeout(limit, command.output()).await {
        Ok(result) => result.map_err(|e| ExtractionError::ToolUnavailable {
            tool,
            reason: e.to_string(),
        }),
        Err(_) => Err(ExtractionError::Timeout { tool, after: limit }),
    }
}
