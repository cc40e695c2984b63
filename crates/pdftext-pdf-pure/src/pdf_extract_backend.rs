use std::any::Any;
use std::panic;
use std::path::Path;

use pdftext_core::{BackendError, ExtractedText, Method, PageProgress, PdfBackend};

/// Whole-document extraction with `pdf-extract`.
///
/// pdf-extract does not report page boundaries, so the result is a text flow
/// that gets split into estimated pages at render time. The library is known
/// to panic on some malformed inputs; panics are caught and reported as
/// [`BackendError::Panicked`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn method(&self) -> Method {
        Method::PdfExtract
    }

    fn extract(
        &self,
        path: &Path,
        _progress: &dyn Fn(PageProgress),
    ) -> Result<ExtractedText, BackendError> {
        let bytes = std::fs::read(path)?;

        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
            Ok(Ok(text)) => Ok(ExtractedText::Flow(text)),
            Ok(Err(e)) => Err(BackendError::Extraction(e.to_string())),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(error = %message, "pdf-extract panicked");
                Err(BackendError::Panicked(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{text_pdf, write_pdf};

    #[test]
    fn test_returns_flow_text() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = text_pdf(&[&["Quarterly", "Report"], &["Appendix"]]).unwrap();
        let path = write_pdf(&dir, "flow.pdf", &bytes);

        let text = PdfExtractBackend::new().extract(&path, &|_| {}).unwrap();
        let ExtractedText::Flow(flow) = text else {
            panic!("pdf-extract should return a flow");
        };
        assert!(flow.contains("Quarterly"));
        assert!(flow.contains("Appendix"));
    }

    #[test]
    fn test_garbage_is_error_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, "junk.pdf", b"%PDF-1.7\n\x00\x01\x02 garbage trailer");
        let result = PdfExtractBackend::new().extract(&path, &|_| {});
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfExtractBackend::new()
            .extract(&dir.path().join("nope.pdf"), &|_| {})
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("bad xref");
        assert_eq!(panic_message(payload.as_ref()), "bad xref");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
