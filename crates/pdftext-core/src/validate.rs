use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::ExtractError;

const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Facts gathered while validating an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfFileInfo {
    pub size_bytes: u64,
}

impl PdfFileInfo {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Check that `path` looks like a readable PDF before handing it to a backend.
///
/// Only cheap checks are done here: existence, regular file, `.pdf`
/// extension and the `%PDF` signature. Structural damage is left to the
/// backends to discover.
pub fn check_pdf_file(path: &Path) -> Result<PdfFileInfo, ExtractError> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if !metadata.is_file() {
        return Err(invalid(path, "not a regular file"));
    }

    let is_pdf_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf_ext {
        return Err(invalid(path, "expected a .pdf extension"));
    }

    let mut header = Vec::with_capacity(5);
    File::open(path)
        .and_then(|f| f.take(5).read_to_end(&mut header))
        .map_err(|e| io_error(path, e))?;
    if !header.starts_with(PDF_SIGNATURE) {
        return Err(invalid(path, "missing %PDF signature"));
    }

    Ok(PdfFileInfo {
        size_bytes: metadata.len(),
    })
}

fn invalid(path: &Path, reason: &str) -> ExtractError {
    ExtractError::InvalidPdf {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn io_error(path: &Path, err: io::Error) -> ExtractError {
    match err.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path.to_path_buf()),
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    }
}
