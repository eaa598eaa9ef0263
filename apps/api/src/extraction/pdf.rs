//! PDF text extraction with a single fallback.
//!
//! The primary backend (`pdf-extract`) reads the document page by page. If it
//! fails for any reason, including a panic inside the library, the fallback
//! backend (`lopdf`) reads the whole upload again from its first byte. There
//! is no third attempt: a fallback failure is returned to the caller.
//!
//! A primary result that is merely empty is accepted as-is and does not
//! trigger the fallback.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::extraction::ExtractionError;

/// One way of turning PDF bytes into per-page text.
pub trait PdfTextSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the text of every page in document order. Pages without text
    /// yield an empty string.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Per-page extraction through `pdf-extract`.
pub struct PdfExtractSource;

impl PdfTextSource for PdfExtractSource {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| ExtractionError::Pdf {
            backend: self.name(),
            message: e.to_string(),
        })
    }
}

/// Whole-document load through `lopdf`, then text per page in page order.
pub struct LopdfSource;

impl PdfTextSource for LopdfSource {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let to_error = |e: lopdf::Error| ExtractionError::Pdf {
            backend: self.name(),
            message: e.to_string(),
        };

        let doc = lopdf::Document::load_mem(data).map_err(to_error)?;

        // get_pages is keyed by page number, so iteration is already in order
        doc.get_pages()
            .keys()
            .map(|&page| doc.extract_text(&[page]).map_err(to_error))
            .collect()
    }
}

pub struct PdfExtractor {
    primary: Box<dyn PdfTextSource>,
    fallback: Box<dyn PdfTextSource>,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(Box::new(PdfExtractSource), Box::new(LopdfSource))
    }
}

impl PdfExtractor {
    pub fn new(primary: Box<dyn PdfTextSource>, fallback: Box<dyn PdfTextSource>) -> Self {
        Self { primary, fallback }
    }

    /// Extracts all page text, concatenated without separators.
    pub fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed documents; treat that as a failure too.
        let primary = panic::catch_unwind(AssertUnwindSafe(|| self.primary.extract_pages(data)))
            .unwrap_or_else(|_| {
                Err(ExtractionError::Pdf {
                    backend: self.primary.name(),
                    message: "extractor panicked".to_string(),
                })
            });

        let pages = match primary {
            Ok(pages) => pages,
            Err(e) => {
                warn!(
                    "Primary PDF extraction ({}) failed, falling back to {}: {e}",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.extract_pages(data)?
            }
        };

        Ok(pages.concat())
    }
}
