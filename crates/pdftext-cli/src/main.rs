use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pdftext_core::config_file::{self, ConfigFile};
use pdftext_core::{default_output_path, save_text};
use pdftext_ingest::{ExtractOptions, Method, Strategy};

mod logging;
mod output;

use output::ColorMode;

/// Log file written next to the working directory unless overridden.
const DEFAULT_LOG_FILE: &str = "pdf_extraction.log";

/// PDF text extractor - pull the text out of a PDF, falling back across
/// extraction backends until one works
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    #[arg(required_unless_present = "list_methods")]
    pdf_file: Option<PathBuf>,

    /// Output text file (default: <name>_extracted.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction method (default: auto)
    #[arg(short, long, value_enum)]
    method: Option<MethodArg>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Content lines a result must exceed to be accepted
    #[arg(long)]
    min_lines: Option<usize>,

    /// Path to the log file (default: pdf_extraction.log)
    #[arg(long, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Log to the console only
    #[arg(long)]
    no_log_file: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// List the extraction methods built into this binary and exit
    #[arg(long)]
    list_methods: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Auto,
    Mupdf,
    Lopdf,
    PdfExtract,
}

impl From<MethodArg> for Strategy {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Auto => Strategy::Auto,
            MethodArg::Mupdf => Strategy::Only(Method::Mupdf),
            MethodArg::Lopdf => Strategy::Only(Method::Lopdf),
            MethodArg::PdfExtract => Strategy::Only(Method::PdfExtract),
        }
    }
}

/// Settings after merging flags, environment and config files.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    strategy: Strategy,
    options: ExtractOptions,
    log_file: Option<PathBuf>,
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());

    if cli.list_methods {
        output::print_methods(
            &mut std::io::stdout(),
            &pdftext_ingest::available_methods(),
            color,
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    let (config, config_errors) = config_file::load_config();
    let settings = resolve_settings(&cli, &config, |key| std::env::var(key).ok())?;
    let ansi = !cli.no_color && std::io::stderr().is_terminal();
    let _log_guard = logging::init(settings.verbose, settings.log_file.as_deref(), ansi)?;
    logging::report_config_errors(&config_errors);

    let pdf_path = cli.pdf_file.context("a PDF path is required")?;
    let output_path = cli
        .output
        .unwrap_or_else(|| default_output_path(&pdf_path));

    run(&pdf_path, &output_path, &settings, color)
}

fn run(
    pdf_path: &Path,
    output_path: &Path,
    settings: &Settings,
    color: ColorMode,
) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let rendered =
        match pdftext_ingest::extract_pdf_text(pdf_path, settings.strategy, &settings.options) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::error!(error = %e, "text extraction failed");
                output::print_extraction_failure(
                    &mut std::io::stderr(),
                    &e,
                    &pdftext_ingest::available_methods(),
                    color,
                )?;
                return Ok(ExitCode::FAILURE);
            }
        };

    if let Err(e) = save_text(&rendered.text, output_path) {
        tracing::error!(error = %e, "saving failed");
        output::print_save_failure(&mut std::io::stderr(), &e, color)?;
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(
        elapsed_secs = %format!("{:.2}", start.elapsed().as_secs_f64()),
        "done"
    );
    output::print_success(
        &mut std::io::stdout(),
        output_path,
        &rendered.stats,
        color,
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Resolve configuration: CLI flags > env vars > config file > defaults.
fn resolve_settings(
    cli: &Cli,
    config: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let strategy: Strategy = match cli.method {
        Some(arg) => arg.into(),
        None => match env("PDFTEXT_METHOD") {
            Some(value) => value
                .parse::<Strategy>()
                .context("invalid PDFTEXT_METHOD environment variable")?,
            None => match config.method() {
                Some(value) => value
                    .parse::<Strategy>()
                    .context("invalid extraction.method in config file")?,
                None => Strategy::Auto,
            },
        },
    };

    let defaults = ExtractOptions::default();
    let options = ExtractOptions {
        min_content_lines: cli
            .min_lines
            .or(config.min_content_lines())
            .unwrap_or(defaults.min_content_lines),
        chars_per_estimated_page: config
            .chars_per_estimated_page()
            .unwrap_or(defaults.chars_per_estimated_page),
        header_exclusion: config
            .header_exclusion()
            .unwrap_or(defaults.header_exclusion),
        footer_exclusion: config
            .footer_exclusion()
            .unwrap_or(defaults.footer_exclusion),
    };

    let log_file = if cli.no_log_file {
        None
    } else {
        Some(
            cli.log_file
                .clone()
                .or_else(|| env("PDFTEXT_LOG_FILE").map(PathBuf::from))
                .or_else(|| config.log_file().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        )
    };

    Ok(Settings {
        strategy,
        options,
        log_file,
        verbose: cli.verbose || config.verbose().unwrap_or(false),
    })
}
