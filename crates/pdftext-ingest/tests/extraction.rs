//! End-to-end extraction through the default backend chain.

mod common;

use pdftext_core::{AttemptFailure, save_text};
use pdftext_ingest::{ExtractError, ExtractOptions, Method, Strategy, extract_pdf_text};

use common::{report_pdf, text_pdf, write_file};

#[test]
fn text_pdf_yields_one_marker_per_source_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = report_pdf(&dir);

    let rendered = extract_pdf_text(&path, Strategy::Auto, &ExtractOptions::default()).unwrap();
    assert_eq!(rendered.stats.pages, 2);
    assert!(!rendered.stats.estimated);
    assert!(rendered.text.contains("=== Page 1 ==="));
    assert!(rendered.text.contains("=== Page 2 ==="));
    assert!(!rendered.text.contains("=== Page 3 ==="));
    assert!(rendered.text.contains("Annual Report"));

    let first = rendered.text.find("Annual Report").unwrap();
    let second = rendered.text.find("Outlook").unwrap();
    assert!(first < second, "page order must follow the source");
}

#[test]
fn explicit_lopdf_method_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = report_pdf(&dir);

    let rendered = extract_pdf_text(
        &path,
        Strategy::Only(Method::Lopdf),
        &ExtractOptions::default(),
    )
    .unwrap();
    assert_eq!(rendered.stats.pages, 2);
    assert!(rendered.text.starts_with("=== Page 1 ===\n"));
}

#[test]
fn pdf_extract_output_uses_estimated_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = report_pdf(&dir);

    // pdf-extract's line breaking differs from the per-page backends, so only
    // require some text here.
    let options = ExtractOptions {
        min_content_lines: 0,
        ..ExtractOptions::default()
    };
    let rendered = extract_pdf_text(&path, Strategy::Only(Method::PdfExtract), &options).unwrap();
    assert!(rendered.stats.estimated);
    assert!(rendered.text.starts_with("=== Page 1 (estimated) ===\n"));
}

#[test]
fn missing_file_is_not_found_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");
    let output = dir.path().join("missing_extracted.txt");

    let result = extract_pdf_text(&missing, Strategy::Auto, &ExtractOptions::default());
    if let Ok(rendered) = &result {
        save_text(&rendered.text, &output).unwrap();
    }
    assert!(matches!(result, Err(ExtractError::NotFound(_))));
    assert!(!output.exists());
}

#[test]
fn corrupt_file_exhausts_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "corrupt.pdf",
        b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R\nstream garbage\x00\xff",
    );

    let err = extract_pdf_text(&path, Strategy::Auto, &ExtractOptions::default()).unwrap_err();
    match err {
        ExtractError::AllBackendsFailed { attempts } => {
            assert_eq!(attempts.len(), Method::PRIORITY.len());
        }
        other => panic!("expected AllBackendsFailed, got {other:?}"),
    }
}

#[test]
fn specific_method_failure_is_distinct_from_auto_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "corrupt.pdf", b"%PDF-1.4\nnot a real document");

    let err = extract_pdf_text(
        &path,
        Strategy::Only(Method::Lopdf),
        &ExtractOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::MethodFailed {
            method: Method::Lopdf,
            ..
        }
    ));
}

#[cfg(not(feature = "mupdf"))]
#[test]
fn mupdf_unavailable_without_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = report_pdf(&dir);

    let err = extract_pdf_text(
        &path,
        Strategy::Only(Method::Mupdf),
        &ExtractOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExtractError::MethodUnavailable(Method::Mupdf)));
}

#[test]
fn sparse_document_fails_content_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = text_pdf(&[&["Only a title"], &["and a footer"]]).unwrap();
    let path = write_file(&dir, "sparse.pdf", &bytes);

    let err = extract_pdf_text(&path, Strategy::Auto, &ExtractOptions::default()).unwrap_err();
    let ExtractError::AllBackendsFailed { attempts } = err else {
        panic!("sparse document should fail in auto mode");
    };
    assert!(
        attempts
            .iter()
            .any(|a| matches!(a.failure, AttemptFailure::InsufficientText { .. }))
    );

    let options = ExtractOptions {
        min_content_lines: 1,
        ..ExtractOptions::default()
    };
    let rendered = extract_pdf_text(&path, Strategy::Only(Method::Lopdf), &options).unwrap();
    assert_eq!(rendered.stats.pages, 2);
}

#[test]
fn non_pdf_extension_rejected_before_backends() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = text_pdf(&[&["x"]]).unwrap();
    let path = write_file(&dir, "document.bin", &bytes);

    let err = extract_pdf_text(&path, Strategy::Auto, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidPdf { .. }));
}
