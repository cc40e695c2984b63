//! Pure-Rust extraction backends.
//!
//! Neither backend links native code, so they are always compiled in and act
//! as the fallbacks behind MuPDF.

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
mod lopdf_backend;
mod pdf_extract_backend;

pub use lopdf_backend::LopdfBackend;
pub use pdf_extract_backend::PdfExtractBackend;
