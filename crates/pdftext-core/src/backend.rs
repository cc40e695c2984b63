use std::path::Path;

use thiserror::Error;

use crate::{ExtractedText, Method};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("PDF is encrypted or password protected")]
    Encrypted,
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("backend panicked: {0}")]
    Panicked(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress report emitted by a backend after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based number of the page just processed.
    pub page: usize,
    pub total: usize,
}

/// Trait for PDF text extraction backends.
///
/// Implementors wrap one third-party library. Fallback ordering, content
/// checks and rendering live in [`crate::Extractor`] and [`crate::render`].
pub trait PdfBackend: Send + Sync {
    /// Which method this backend implements.
    fn method(&self) -> Method;

    /// Extract the text content of a PDF file.
    ///
    /// Backends that know page boundaries return [`ExtractedText::Pages`] and
    /// call `progress` once per page.
    fn extract(
        &self,
        path: &Path,
        progress: &dyn Fn(PageProgress),
    ) -> Result<ExtractedText, BackendError>;
}
