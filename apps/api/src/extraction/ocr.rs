//! OCR for image uploads.
//!
//! The upload is decoded with the `image` crate first, so a corrupt or
//! mislabelled file fails before any external process is started. The decoded
//! bitmap is re-encoded as PNG into a temp file and read by the `tesseract` CLI.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use image::ImageFormat;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::extraction::ExtractionError;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, data: Bytes) -> Result<String, ExtractionError>;
}

pub struct TesseractOcr {
    command: String,
    lang: String,
}

impl TesseractOcr {
    pub fn new(command: String, lang: String) -> Self {
        Self { command, lang }
    }

    async fn run(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", self.lang.as_str()])
            .output()
            .await
            .map_err(|e| ExtractionError::Ocr(format!("failed to run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Decodes `data` and writes the bitmap to a PNG temp file. The file is
/// removed when the returned handle is dropped.
fn decode_to_png(data: &[u8]) -> Result<NamedTempFile, ExtractionError> {
    let bitmap = image::load_from_memory(data)?;
    debug!("Decoded {}x{} image for OCR", bitmap.width(), bitmap.height());

    let file = tempfile::Builder::new()
        .prefix("resume-ocr-")
        .suffix(".png")
        .tempfile()?;
    bitmap.save_with_format(file.path(), ImageFormat::Png)?;
    Ok(file)
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, data: Bytes) -> Result<String, ExtractionError> {
        let png = tokio::task::spawn_blocking(move || decode_to_png(&data)).await??;
        self.run(png.path()).await
    }
}
