use std::sync::Arc;

use crate::extraction::TextExtractor;
use crate::resume::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text extractor. Default: DocumentExtractor (pdf-extract, lopdf, tesseract).
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable resume parser. Default: LlmResumeParser.
    pub parser: Arc<dyn ResumeParser>,
}
