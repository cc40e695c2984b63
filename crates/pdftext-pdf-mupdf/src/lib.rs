use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdftext_core::{BackendError, ExtractedText, Method, PageProgress, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so builds without the `mupdf` feature of
/// `pdftext-ingest` do not link it.
///
/// Header and footer bands can be dropped per page, which keeps running
/// heads and page numbers out of the text. Both are off by default.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = valid_ratio("footer_exclusion", ratio);
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = valid_ratio("header_exclusion", ratio);
        self
    }
}

/// Ratios outside `(0.0, 1.0)` disable the band; anything but `0.0` is
/// logged as a misconfiguration.
fn valid_ratio(name: &str, ratio: f32) -> Option<f32> {
    if ratio > 0.0 && ratio < 1.0 {
        Some(ratio)
    } else {
        if ratio != 0.0 {
            tracing::warn!(
                setting = name,
                ratio,
                "exclusion ratio must be between 0.0 and 1.0, band disabled"
            );
        }
        None
    }
}

impl PdfBackend for MupdfBackend {
    fn method(&self) -> Method {
        Method::Mupdf
    }

    fn extract(
        &self,
        path: &Path,
        progress: &dyn Fn(PageProgress),
    ) -> Result<ExtractedText, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| BackendError::Open(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::Open(e.to_string()))?
        {
            return Err(BackendError::Encrypted);
        }

        let total = document
            .page_count()
            .map_err(|e| BackendError::Extraction(e.to_string()))?
            .max(0) as usize;
        tracing::debug!(pages = total, "mupdf opened document");

        let mut pages_text = Vec::with_capacity(total);

        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::Extraction(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| BackendError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::Extraction(e.to_string()))?;

            // Page bounds for header/footer exclusion
            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::Extraction(e.to_string()))?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let header_threshold = self
                .header_exclusion_ratio
                .map(|r| page_bounds.y0 + page_height * r);
            let footer_threshold = self
                .footer_exclusion_ratio
                .map(|r| page_bounds.y1 - page_height * r);

            let mut page_text = String::new();
            for block in text_page.blocks() {
                let block_bounds = block.bounds();

                // Skip blocks entirely within the header region
                if let Some(threshold) = header_threshold
                    && block_bounds.y1 <= threshold
                {
                    continue;
                }

                // Skip blocks whose top edge is in the footer region
                if let Some(threshold) = footer_threshold
                    && block_bounds.y0 >= threshold
                {
                    continue;
                }

                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(line_text.trim_end());
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);

            progress(PageProgress {
                page: index + 1,
                total: total.max(index + 1),
            });
        }

        Ok(ExtractedText::Pages(pages_text))
    }
}
