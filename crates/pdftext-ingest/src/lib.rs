use std::path::Path;

use pdftext_core::{Extractor, RenderOptions};
use pdftext_pdf_pure::{LopdfBackend, PdfExtractBackend};

// Re-export domain types for convenience
pub use pdftext_core::{
    ExtractError, ExtractedDocument, ExtractedText, Method, RenderedText, Strategy, TextStats,
};

/// Tunables shared by every backend in the default chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    pub min_content_lines: usize,
    pub chars_per_estimated_page: usize,
    /// MuPDF header band, as a fraction of page height. `0.0` disables.
    pub header_exclusion: f32,
    /// MuPDF footer band, as a fraction of page height. `0.0` disables.
    pub footer_exclusion: f32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_content_lines: pdftext_core::DEFAULT_MIN_CONTENT_LINES,
            chars_per_estimated_page: pdftext_core::DEFAULT_CHARS_PER_ESTIMATED_PAGE,
            header_exclusion: 0.0,
            footer_exclusion: 0.0,
        }
    }
}

/// Build an [`Extractor`] with every backend compiled into this build.
///
/// - MuPDF (requires the `mupdf` feature)
/// - lopdf
/// - pdf-extract
pub fn default_extractor(options: &ExtractOptions) -> Extractor {
    let extractor = Extractor::new()
        .with_min_content_lines(options.min_content_lines)
        .with_backend(Box::new(LopdfBackend::new()))
        .with_backend(Box::new(PdfExtractBackend::new()));
    with_mupdf(extractor, options)
}

#[cfg(feature = "mupdf")]
fn with_mupdf(extractor: Extractor, options: &ExtractOptions) -> Extractor {
    let backend = pdftext_pdf_mupdf::MupdfBackend::new()
        .with_header_exclusion(options.header_exclusion)
        .with_footer_exclusion(options.footer_exclusion);
    extractor.with_backend(Box::new(backend))
}

#[cfg(not(feature = "mupdf"))]
fn with_mupdf(extractor: Extractor, _options: &ExtractOptions) -> Extractor {
    extractor
}

/// Methods compiled into this build, in automatic-mode priority order.
pub fn available_methods() -> Vec<Method> {
    default_extractor(&ExtractOptions::default()).available_methods()
}

/// Extract and render the text of a PDF with page markers.
pub fn extract_pdf_text(
    path: &Path,
    strategy: Strategy,
    options: &ExtractOptions,
) -> Result<RenderedText, ExtractError> {
    let doc = default_extractor(options).extract(path, strategy)?;
    let rendered = pdftext_core::render(
        &doc,
        &RenderOptions {
            chars_per_estimated_page: options.chars_per_estimated_page,
        },
    );
    tracing::info!(
        method = %doc.method,
        pages = rendered.stats.pages,
        estimated = rendered.stats.estimated,
        lines = rendered.stats.non_empty_lines,
        chars = rendered.stats.chars,
        "extraction complete"
    );
    Ok(rendered)
}
