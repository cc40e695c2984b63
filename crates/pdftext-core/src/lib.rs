use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extractor;
pub mod output;
pub mod render;
pub mod validate;

// Re-export for convenience
pub use backend::{BackendError, PageProgress, PdfBackend};
pub use extractor::{DEFAULT_MIN_CONTENT_LINES, Extractor};
pub use output::{OutputError, default_output_path, save_text};
pub use render::{DEFAULT_CHARS_PER_ESTIMATED_PAGE, RenderOptions, RenderedText, TextStats, render};
pub use validate::{PdfFileInfo, check_pdf_file};

/// A concrete extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// MuPDF, layout-aware per-page extraction.
    Mupdf,
    /// lopdf, plain per-page content stream decoding.
    Lopdf,
    /// pdf-extract, whole-document text without page boundaries.
    PdfExtract,
}

impl Method {
    /// Order in which automatic mode tries the backends.
    pub const PRIORITY: [Method; 3] = [Method::Mupdf, Method::Lopdf, Method::PdfExtract];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Mupdf => "mupdf",
            Method::Lopdf => "lopdf",
            Method::PdfExtract => "pdf-extract",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mupdf" => Ok(Method::Mupdf),
            "lopdf" => Ok(Method::Lopdf),
            "pdf-extract" | "pdf_extract" | "pdfextract" => Ok(Method::PdfExtract),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// How to pick the backend for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Try every backend in [`Method::PRIORITY`] order until one succeeds.
    #[default]
    Auto,
    /// Use exactly one backend; no fallback.
    Only(Method),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Auto => f.write_str("auto"),
            Strategy::Only(method) => fmt::Display::fmt(method, f),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Strategy::Auto)
        } else {
            s.parse().map(Strategy::Only)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown extraction method '{0}' (expected auto, mupdf, lopdf or pdf-extract)")]
pub struct UnknownMethod(pub String);

/// Text as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// One entry per source page, in source order.
    Pages(Vec<String>),
    /// The backend does not report page boundaries.
    Flow(String),
}

impl ExtractedText {
    /// Number of non-blank lines that are not page markers.
    pub fn content_lines(&self) -> usize {
        let count = |text: &str| {
            text.lines()
                .filter(|line| !line.trim().is_empty() && !line.starts_with("==="))
                .count()
        };
        match self {
            ExtractedText::Pages(pages) => pages.iter().map(|p| count(p)).sum(),
            ExtractedText::Flow(text) => count(text),
        }
    }

    /// Source page count, when the backend knows it.
    pub fn page_count(&self) -> Option<usize> {
        match self {
            ExtractedText::Pages(pages) => Some(pages.len()),
            ExtractedText::Flow(_) => None,
        }
    }

    /// 1-based numbers of pages with no text.
    pub fn blank_pages(&self) -> Vec<usize> {
        match self {
            ExtractedText::Pages(pages) => pages
                .iter()
                .enumerate()
                .filter(|(_, p)| p.trim().is_empty())
                .map(|(i, _)| i + 1)
                .collect(),
            ExtractedText::Flow(_) => Vec::new(),
        }
    }
}

/// The winning backend's output.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub method: Method,
    pub text: ExtractedText,
}

/// Why a single backend attempt did not produce a result.
#[derive(Error, Debug)]
pub enum AttemptFailure {
    #[error("backend not available in this build")]
    Unavailable,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("too little text ({found} content lines, need more than {required})")]
    InsufficientText { found: usize, required: usize },
}

/// One backend attempt recorded by automatic mode.
#[derive(Debug)]
pub struct Attempt {
    pub method: Method,
    pub failure: AttemptFailure,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.method, self.failure)
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("not a valid PDF ({reason}): {}", .path.display())]
    InvalidPdf { path: PathBuf, reason: String },
    #[error("extraction method '{0}' is not available in this build")]
    MethodUnavailable(Method),
    #[error("extraction with {method} failed: {failure}")]
    MethodFailed {
        method: Method,
        failure: AttemptFailure,
    },
    #[error("all extraction methods failed ({})", summarize(.attempts))]
    AllBackendsFailed { attempts: Vec<Attempt> },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn summarize(attempts: &[Attempt]) -> String {
    if attempts.is_empty() {
        return "no backends registered".to_string();
    }
    attempts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
