use std::path::Path;

use lopdf::Document;

use pdftext_core::{BackendError, ExtractedText, Method, PageProgress, PdfBackend};

/// Per-page extraction by decoding content streams with `lopdf`.
///
/// A page whose content cannot be decoded is returned as empty text instead
/// of failing the whole document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn method(&self) -> Method {
        Method::Lopdf
    }

    fn extract(
        &self,
        path: &Path,
        progress: &dyn Fn(PageProgress),
    ) -> Result<ExtractedText, BackendError> {
        let doc = Document::load(path).map_err(|e| BackendError::Open(e.to_string()))?;

        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(BackendError::Encrypted);
        }

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        let total = page_numbers.len();
        tracing::debug!(pages = total, "lopdf loaded document");

        let mut pages_text = Vec::with_capacity(total);
        for (index, page_num) in page_numbers.into_iter().enumerate() {
            let text = match doc.extract_text(&[page_num]) {
                Ok(text) => text.trim_end().to_string(),
                Err(e) => {
                    tracing::warn!(page = page_num, error = %e, "lopdf could not decode page");
                    String::new()
                }
            };
            pages_text.push(text);
            progress(PageProgress {
                page: index + 1,
                total,
            });
        }

        Ok(ExtractedText::Pages(pages_text))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::fixtures::{text_pdf, write_pdf};

    #[test]
    fn test_extracts_each_page_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let bytes =
            text_pdf(&[&["Hello first page", "second line"], &["Another page here"]]).unwrap();
        let path = write_pdf(&dir, "two.pdf", &bytes);

        let text = LopdfBackend::new().extract(&path, &|_| {}).unwrap();
        let ExtractedText::Pages(pages) = text else {
            panic!("lopdf should report pages");
        };
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Hello first page"));
        assert!(pages[0].contains("second line"));
        assert!(pages[1].contains("Another page here"));
        assert!(!pages[0].contains("Another page"));
    }

    #[test]
    fn test_reports_progress_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = text_pdf(&[&["a"], &["b"], &["c"]]).unwrap();
        let path = write_pdf(&dir, "three.pdf", &bytes);

        let seen = RefCell::new(Vec::new());
        LopdfBackend::new()
            .extract(&path, &|p| seen.borrow_mut().push((p.page, p.total)))
            .unwrap();
        assert_eq!(seen.into_inner(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_corrupt_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, "corrupt.pdf", b"%PDF-1.4\n1 0 obj << /Type /Cat");
        let err = LopdfBackend::new().extract(&path, &|_| {}).unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LopdfBackend::new().extract(&dir.path().join("missing.pdf"), &|_| {});
        assert!(result.is_err());
    }
}
