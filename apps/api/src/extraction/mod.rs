//! Text extraction from uploaded resume files.
//!
//! PDFs go through [`pdf::PdfExtractor`] (primary backend with one fallback),
//! images through an [`ocr::OcrEngine`]. The file kind is decided by the
//! filename extension alone.

pub mod ocr;
pub mod pdf;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::extraction::ocr::{OcrEngine, TesseractOcr};
use crate::extraction::pdf::PdfExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed ({backend}): {message}")]
    Pdf {
        backend: &'static str,
        message: String,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Upload kinds the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
}

impl FileKind {
    /// Classifies a filename by its extension, case-insensitively.
    /// Returns `None` for anything other than `.pdf`, `.png`, `.jpg` or `.jpeg`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(FileKind::Pdf)
        } else if [".png", ".jpg", ".jpeg"]
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            Some(FileKind::Image)
        } else {
            None
        }
    }
}

/// Turns an uploaded file into plain text. Carried in `AppState` as
/// `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, kind: FileKind, data: Bytes) -> Result<String, ExtractionError>;
}

/// Production extractor: PDF backends for documents, OCR for images.
pub struct DocumentExtractor {
    pdf: Arc<PdfExtractor>,
    ocr: Arc<dyn OcrEngine>,
}

impl DocumentExtractor {
    pub fn new(pdf: PdfExtractor, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            pdf: Arc::new(pdf),
            ocr,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PdfExtractor::default(),
            Arc::new(TesseractOcr::new(
                config.tesseract_cmd.clone(),
                config.ocr_lang.clone(),
            )),
        )
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, kind: FileKind, data: Bytes) -> Result<String, ExtractionError> {
        let text = match kind {
            FileKind::Pdf => {
                // PDF parsing is CPU-bound; keep it off the async workers.
                let pdf = Arc::clone(&self.pdf);
                tokio::task::spawn_blocking(move || pdf.extract(&data)).await??
            }
            FileKind::Image => self.ocr.recognize(data).await?,
        };

        info!("Extracted {} characters from {:?} upload", text.chars().count(), kind);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoOcr;

    #[async_trait]
    impl OcrEngine for NoOcr {
        async fn recognize(&self, _data: Bytes) -> Result<String, ExtractionError> {
            Err(ExtractionError::Ocr("not available in tests".to_string()))
        }
    }

    #[test]
    fn test_file_kind_accepts_supported_extensions() {
        assert_eq!(FileKind::from_filename("resume.pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("Resume.PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("scan.png"), Some(FileKind::Image));
        assert_eq!(FileKind::from_filename("scan.JPG"), Some(FileKind::Image));
        assert_eq!(FileKind::from_filename("scan.jpeg"), Some(FileKind::Image));
        assert_eq!(FileKind::from_filename("archive.tar.pdf"), Some(FileKind::Pdf));
    }

    #[test]
    fn test_file_kind_rejects_everything_else() {
        for name in [
            "resume.docx",
            "resume.txt",
            "resume",
            "pdf",
            "resume.pdf.exe",
            "photo.gif",
            "photo.jpe",
            "",
        ] {
            assert_eq!(FileKind::from_filename(name), None, "{name} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_pdf_upload_extracts_text() {
        let extractor = DocumentExtractor::new(PdfExtractor::default(), Arc::new(NoOcr));
        let data = Bytes::from(pdf::tests::hello_world_pdf());

        let text = extractor.extract(FileKind::Pdf, data).await.unwrap();
        assert!(text.contains("Hello World"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_unreadable_pdf_propagates_fallback_error() {
        let extractor = DocumentExtractor::new(PdfExtractor::default(), Arc::new(NoOcr));

        let err = extractor
            .extract(FileKind::Pdf, Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf { backend: "lopdf", .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_image_upload_goes_to_ocr() {
        let extractor = DocumentExtractor::new(PdfExtractor::default(), Arc::new(NoOcr));

        let err = extractor
            .extract(FileKind::Image, Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Ocr(_)));
    }
}
