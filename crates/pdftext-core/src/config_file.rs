use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extraction: Option<ExtractionConfig>,
    pub mupdf: Option<MupdfConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// `auto`, `mupdf`, `lopdf` or `pdf-extract`.
    pub method: Option<String>,
    pub min_content_lines: Option<usize>,
    pub chars_per_estimated_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MupdfConfig {
    /// Fraction of page height from the top to drop (0.0 disables).
    pub header_exclusion: Option<f32>,
    /// Fraction of page height from the bottom to drop (0.0 disables).
    pub footer_exclusion: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub verbose: Option<bool>,
}

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_NAME: &str = ".pdftext.toml";

/// Platform config directory path: `<config_dir>/pdftext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdftext").join("config.toml"))
}

/// A config file that exists but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("ignoring unparsable config file {}: {source}", .path.display())]
pub struct ConfigError {
    pub path: PathBuf,
    pub source: toml::de::Error,
}

/// Load config by cascading CWD `.pdftext.toml` over platform config.
/// CWD values override platform values.
///
/// Files that fail to parse are skipped and returned alongside the config
/// so the caller can report them once logging is installed.
pub fn load_config() -> (ConfigFile, Vec<ConfigError>) {
    load_cascade(config_path().as_deref(), Path::new(LOCAL_CONFIG_NAME))
}

fn load_cascade(platform: Option<&Path>, local: &Path) -> (ConfigFile, Vec<ConfigError>) {
    let mut errors = Vec::new();
    let mut load = |path: &Path| match load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            errors.push(e);
            None
        }
    };
    let platform = platform.and_then(&mut load);
    let cwd = load(local);

    let config = match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    };
    (config, errors)
}

/// Load a config from a specific path. Returns `Ok(None)` if the file
/// doesn't exist or can't be read.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(None);
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError {
            path: path.to_path_buf(),
            source,
        })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_ex = base.extraction.unwrap_or_default();
    let over_ex = overlay.extraction.unwrap_or_default();
    let base_mu = base.mupdf.unwrap_or_default();
    let over_mu = overlay.mupdf.unwrap_or_default();
    let base_log = base.logging.unwrap_or_default();
    let over_log = overlay.logging.unwrap_or_default();

    ConfigFile {
        extraction: Some(ExtractionConfig {
            method: over_ex.method.or(base_ex.method),
            min_content_lines: over_ex.min_content_lines.or(base_ex.min_content_lines),
            chars_per_estimated_page: over_ex
                .chars_per_estimated_page
                .or(base_ex.chars_per_estimated_page),
        }),
        mupdf: Some(MupdfConfig {
            header_exclusion: over_mu.header_exclusion.or(base_mu.header_exclusion),
            footer_exclusion: over_mu.footer_exclusion.or(base_mu.footer_exclusion),
        }),
        logging: Some(LoggingConfig {
            file: over_log.file.or(base_log.file),
            verbose: over_log.verbose.or(base_log.verbose),
        }),
    }
}

impl ConfigFile {
    pub fn method(&self) -> Option<&str> {
        self.extraction.as_ref()?.method.as_deref()
    }

    pub fn min_content_lines(&self) -> Option<usize> {
        self.extraction.as_ref()?.min_content_lines
    }

    pub fn chars_per_estimated_page(&self) -> Option<usize> {
        self.extraction.as_ref()?.chars_per_estimated_page
    }

    pub fn header_exclusion(&self) -> Option<f32> {
        self.mupdf.as_ref()?.header_exclusion
    }

    pub fn footer_exclusion(&self) -> Option<f32> {
        self.mupdf.as_ref()?.footer_exclusion
    }

    pub fn log_file(&self) -> Option<&str> {
        self.logging.as_ref()?.file.as_deref()
    }

    pub fn verbose(&self) -> Option<bool> {
        self.logging.as_ref()?.verbose
    }
}
