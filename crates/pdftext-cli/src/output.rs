use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pdftext_core::OutputError;
use pdftext_ingest::{ExtractError, Method, TextStats};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the compiled-in methods in automatic-mode order.
pub fn print_methods(
    w: &mut dyn Write,
    available: &[Method],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extraction methods (automatic mode tries them in this order):")?;
    for method in Method::PRIORITY {
        let present = available.contains(&method);
        match (present, color.enabled()) {
            (true, true) => writeln!(w, "  {:<12} {}", method.name(), "available".green())?,
            (true, false) => writeln!(w, "  {:<12} available", method.name())?,
            (false, true) => writeln!(w, "  {:<12} {}", method.name(), "not built".dimmed())?,
            (false, false) => writeln!(w, "  {:<12} not built", method.name())?,
        }
    }
    Ok(())
}

/// Print the success line after the output file has been written.
pub fn print_success(
    w: &mut dyn Write,
    output: &Path,
    stats: &TextStats,
    color: ColorMode,
) -> std::io::Result<()> {
    let pages = if stats.estimated {
        format!("{} estimated pages", stats.pages)
    } else {
        format!("{} pages", stats.pages)
    };
    writeln!(w)?;
    if color.enabled() {
        writeln!(
            w,
            "{} {}",
            "Text extracted to:".green().bold(),
            output.display()
        )?;
        writeln!(
            w,
            "{}",
            format!(
                "({}, {} non-empty lines, {} characters)",
                pages, stats.non_empty_lines, stats.chars
            )
            .dimmed()
        )?;
    } else {
        writeln!(w, "Text extracted to: {}", output.display())?;
        writeln!(
            w,
            "({}, {} non-empty lines, {} characters)",
            pages, stats.non_empty_lines, stats.chars
        )?;
    }
    Ok(())
}

/// Print an extraction failure with the likely causes for its kind.
pub fn print_extraction_failure(
    w: &mut dyn Write,
    err: &ExtractError,
    available: &[Method],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{} {}", "Extraction failed:".red().bold(), err)?;
    } else {
        writeln!(w, "Extraction failed: {}", err)?;
    }

    match err {
        ExtractError::NotFound(_) | ExtractError::InvalidPdf { .. } => {
            writeln!(w, "Check the path and make sure it points to a PDF file.")?;
        }
        ExtractError::PermissionDenied(_) => {
            writeln!(w, "Check that the file is readable by the current user.")?;
        }
        ExtractError::Io { .. } => {}
        ExtractError::MethodUnavailable(method) => {
            writeln!(w, "'{}' was not compiled into this build.", method)?;
            let names: Vec<&str> = available.iter().map(|m| m.name()).collect();
            writeln!(w, "Available methods: auto, {}", names.join(", "))?;
        }
        ExtractError::MethodFailed { .. } | ExtractError::AllBackendsFailed { .. } => {
            print_hints(w, color)?;
        }
    }
    Ok(())
}

fn print_hints(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    let causes = [
        "The PDF is a scan (images only)",
        "The PDF is encrypted or password protected",
        "The backend needed for this file is not built in",
        "The file is damaged",
    ];
    let suggestions = [
        "Try another method: pdftext file.pdf -m lopdf",
        "List built-in methods: pdftext --list-methods",
        "Scanned documents need an OCR tool",
    ];

    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Possible causes:".yellow())?;
    } else {
        writeln!(w, "Possible causes:")?;
    }
    for (i, cause) in causes.iter().enumerate() {
        writeln!(w, "  {}. {}", i + 1, cause)?;
    }

    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Suggestions:".yellow())?;
    } else {
        writeln!(w, "Suggestions:")?;
    }
    for (i, suggestion) in suggestions.iter().enumerate() {
        writeln!(w, "  {}. {}", i + 1, suggestion)?;
    }
    Ok(())
}

/// Print a failure to write the output file.
pub fn print_save_failure(
    w: &mut dyn Write,
    err: &OutputError,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{} {}", "Saving failed:".red().bold(), err)?;
    } else {
        writeln!(w, "Saving failed: {}", err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_methods_listing_marks_missing_backends() {
        let out = render(|w| print_methods(w, &[Method::Lopdf], ColorMode(false)));
        assert!(out.contains("mupdf        not built"));
        assert!(out.contains("lopdf        available"));
        assert!(out.contains("pdf-extract  not built"));
    }

    #[test]
    fn test_success_mentions_output_and_stats() {
        let stats = TextStats {
            pages: 3,
            estimated: false,
            blank_pages: 0,
            non_empty_lines: 40,
            chars: 1234,
        };
        let out = render(|w| print_success(w, Path::new("out/doc.txt"), &stats, ColorMode(false)));
        assert!(out.contains("Text extracted to: out/doc.txt"));
        assert!(out.contains("(3 pages, 40 non-empty lines, 1234 characters)"));
    }

    #[test]
    fn test_estimated_pages_labelled() {
        let stats = TextStats {
            pages: 2,
            estimated: true,
            ..Default::default()
        };
        let out = render(|w| print_success(w, Path::new("a.txt"), &stats, ColorMode(false)));
        assert!(out.contains("2 estimated pages"));
    }

    #[test]
    fn test_all_failed_prints_hints() {
        let err = ExtractError::AllBackendsFailed { attempts: vec![] };
        let out = render(|w| print_extraction_failure(w, &err, &[], ColorMode(false)));
        assert!(out.contains("Extraction failed: all extraction methods failed"));
        assert!(out.contains("Possible causes:"));
        assert!(out.contains("-m lopdf"));
    }

    #[test]
    fn test_unavailable_method_lists_alternatives() {
        let err = ExtractError::MethodUnavailable(Method::Mupdf);
        let out = render(|w| {
            print_extraction_failure(
                w,
                &err,
                &[Method::Lopdf, Method::PdfExtract],
                ColorMode(false),
            )
        });
        assert!(out.contains("'mupdf' was not compiled into this build."));
        assert!(out.contains("Available methods: auto, lopdf, pdf-extract"));
        assert!(!out.contains("Possible causes:"));
    }

    #[test]
    fn test_permission_denied_hint() {
        let err = ExtractError::PermissionDenied(PathBuf::from("locked.pdf"));
        let out = render(|w| print_extraction_failure(w, &err, &[], ColorMode(false)));
        assert!(out.contains("Extraction failed: permission denied: locked.pdf"));
        assert!(out.contains("Check that the file is readable by the current user."));
        assert!(!out.contains("Possible causes:"));
    }

    #[test]
    fn test_not_found_has_no_backend_hints() {
        let err = ExtractError::NotFound(PathBuf::from("missing.pdf"));
        let out = render(|w| print_extraction_failure(w, &err, &[], ColorMode(false)));
        assert!(out.contains("file not found: missing.pdf"));
        assert!(!out.contains("Possible causes:"));
    }
}
