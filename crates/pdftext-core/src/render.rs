//! Turning backend output into the paginated text file format.
//!
//! Paged output:
//!
//! ```text
//! === Page 1 ===
//! first page text
//! === Page 2 === [no text]
//! ```
//!
//! Backends without page boundaries are split into estimated pages of roughly
//! [`RenderOptions::chars_per_estimated_page`] characters.

use crate::{ExtractedDocument, ExtractedText};

pub const DEFAULT_CHARS_PER_ESTIMATED_PAGE: usize = 2000;

const NO_TEXT_MARKER: &str = "[no text]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub chars_per_estimated_page: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chars_per_estimated_page: DEFAULT_CHARS_PER_ESTIMATED_PAGE,
        }
    }
}

/// Summary numbers for a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Pages written, real or estimated.
    pub pages: usize,
    /// True when `pages` counts estimated chunks rather than source pages.
    pub estimated: bool,
    pub blank_pages: usize,
    pub non_empty_lines: usize,
    pub chars: usize,
}

/// Rendered text plus its stats.
#[derive(Debug, Clone)]
pub struct RenderedText {
    pub text: String,
    pub stats: TextStats,
}

/// Render an extracted document with page markers.
pub fn render(doc: &ExtractedDocument, options: &RenderOptions) -> RenderedText {
    let (text, pages, estimated, blank_pages) = match &doc.text {
        ExtractedText::Pages(pages) => {
            let mut out = String::new();
            let mut blank = 0;
            for (i, page) in pages.iter().enumerate() {
                let body = page.trim_end();
                if body.trim().is_empty() {
                    blank += 1;
                    out.push_str(&format!("=== Page {} === {}\n", i + 1, NO_TEXT_MARKER));
                } else {
                    out.push_str(&format!("=== Page {} ===\n{}\n", i + 1, body));
                }
            }
            (out, pages.len(), false, blank)
        }
        ExtractedText::Flow(flow) => {
            let chunks = estimate_pages(flow, options.chars_per_estimated_page);
            let out = chunks
                .iter()
                .enumerate()
                .map(|(i, chunk)| format!("=== Page {} (estimated) ===\n{}", i + 1, chunk))
                .collect::<Vec<_>>()
                .join("\n\n");
            let out = if out.is_empty() { out } else { out + "\n" };
            (out, chunks.len(), true, 0)
        }
    };

    let stats = TextStats {
        pages,
        estimated,
        blank_pages,
        non_empty_lines: text.lines().filter(|l| !l.trim().is_empty()).count(),
        chars: text.chars().count(),
    };
    RenderedText { text, stats }
}

/// Split page-less text into chunks of whole lines.
///
/// Lines accumulate until their summed length reaches `chars_per_page`.
/// Chunks that contain only whitespace are dropped.
pub fn estimate_pages(text: &str, chars_per_page: usize) -> Vec<String> {
    let limit = chars_per_page.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        current.push(line);
        current_len += line.chars().count();
        if current_len >= limit {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }

    chunks.retain(|c| !c.trim().is_empty());
    chunks
}
