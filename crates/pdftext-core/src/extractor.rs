use std::path::Path;

use crate::backend::{PageProgress, PdfBackend};
use crate::validate::check_pdf_file;
use crate::{Attempt, AttemptFailure, ExtractError, ExtractedDocument, Method, Strategy};

/// A result needs strictly more content lines than this to be accepted.
pub const DEFAULT_MIN_CONTENT_LINES: usize = 5;

/// Log page progress every this many pages (and on the last page).
const PROGRESS_INTERVAL: usize = 10;

/// Runs registered backends with the automatic fallback strategy.
///
/// Backends are tried in [`Method::PRIORITY`] order regardless of the order
/// they were registered in. Each backend failure is logged and recorded; only
/// exhausting every backend is surfaced as an error.
pub struct Extractor {
    backends: Vec<Box<dyn PdfBackend>>,
    min_content_lines: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create an extractor with no backends registered.
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
            min_content_lines: DEFAULT_MIN_CONTENT_LINES,
        }
    }

    /// Register a backend, replacing any previous one for the same method.
    pub fn with_backend(mut self, backend: Box<dyn PdfBackend>) -> Self {
        let method = backend.method();
        self.backends.retain(|b| b.method() != method);
        self.backends.push(backend);
        self
    }

    /// Set the content-line threshold a result must exceed.
    pub fn with_min_content_lines(mut self, lines: usize) -> Self {
        self.min_content_lines = lines;
        self
    }

    pub fn min_content_lines(&self) -> usize {
        self.min_content_lines
    }

    /// Registered methods, in priority order.
    pub fn available_methods(&self) -> Vec<Method> {
        Method::PRIORITY
            .into_iter()
            .filter(|m| self.backend(*m).is_some())
            .collect()
    }

    fn backend(&self, method: Method) -> Option<&dyn PdfBackend> {
        self.backends
            .iter()
            .find(|b| b.method() == method)
            .map(|b| b.as_ref())
    }

    /// Validate `path` and extract its text using `strategy`.
    pub fn extract(
        &self,
        path: &Path,
        strategy: Strategy,
    ) -> Result<ExtractedDocument, ExtractError> {
        let info = check_pdf_file(path)?;
        tracing::info!(
            path = %path.display(),
            size_mb = %format!("{:.2}", info.size_mb()),
            %strategy,
            "starting extraction"
        );

        match strategy {
            Strategy::Only(method) => {
                let backend = self
                    .backend(method)
                    .ok_or(ExtractError::MethodUnavailable(method))?;
                self.attempt(backend, path)
                    .map_err(|failure| ExtractError::MethodFailed { method, failure })
            }
            Strategy::Auto => {
                let mut attempts = Vec::new();
                for method in Method::PRIORITY {
                    let Some(backend) = self.backend(method) else {
                        tracing::warn!(%method, "backend not available in this build, skipping");
                        attempts.push(Attempt {
                            method,
                            failure: AttemptFailure::Unavailable,
                        });
                        continue;
                    };
                    match self.attempt(backend, path) {
                        Ok(doc) => return Ok(doc),
                        Err(failure) => attempts.push(Attempt { method, failure }),
                    }
                }
                tracing::error!(
                    attempts = attempts.len(),
                    "all extraction methods failed; the PDF may be scanned images or encrypted"
                );
                Err(ExtractError::AllBackendsFailed { attempts })
            }
        }
    }

    fn attempt(
        &self,
        backend: &dyn PdfBackend,
        path: &Path,
    ) -> Result<ExtractedDocument, AttemptFailure> {
        let method = backend.method();
        tracing::info!(%method, path = %path.display(), "extracting");

        let progress = |p: PageProgress| {
            if p.page % PROGRESS_INTERVAL == 0 || p.page == p.total {
                tracing::info!(%method, "progress: {}/{}", p.page, p.total);
            }
        };

        let text = backend.extract(path, &progress).map_err(|e| {
            tracing::error!(%method, error = %e, "extraction failed");
            AttemptFailure::Backend(e)
        })?;

        let found = text.content_lines();
        if found <= self.min_content_lines {
            tracing::warn!(
                %method,
                found,
                required = self.min_content_lines,
                "too little text extracted, trying another method"
            );
            return Err(AttemptFailure::InsufficientText {
                found,
                required: self.min_content_lines,
            });
        }

        let blank = text.blank_pages();
        if blank.is_empty() {
            tracing::info!(%method, "extraction complete, every page has text");
        } else {
            tracing::warn!(%method, pages = ?blank, "some pages have no text");
        }

        Ok(ExtractedDocument { method, text })
    }
}
