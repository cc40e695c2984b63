//! Shared helpers for the extraction tests.

use std::path::PathBuf;

pub use pdftext_pdf_pure::fixtures::text_pdf;

pub fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// A two-page report with enough lines to pass the content threshold.
pub fn report_pdf(dir: &tempfile::TempDir) -> PathBuf {
    let bytes = text_pdf(&[
        &[
            "Annual Report",
            "Revenue grew in every region",
            "Costs were flat",
            "Headcount increased",
        ],
        &[
            "Outlook",
            "We expect steady demand",
            "Risks remain in supply",
            "End of report",
        ],
    ])
    .unwrap();
    write_file(dir, "report.pdf", &bytes)
}
