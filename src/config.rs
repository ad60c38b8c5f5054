//! Configuration for a uniteocr run.
//!
//! CLI arguments and the few environment variables the tool honours are
//! resolved once, up front, into a [`Config`]. Nothing downstream reads the
//! environment again.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Result, UniteError};
use crate::naming;

/// Languages used when none are given.
pub const DEFAULT_LANGUAGES: &str = "hun+eng";

/// OCR executable used when `UNITEOCR_OCRMYPDF` is not set.
pub const DEFAULT_OCR_PROGRAM: &str = "ocrmypdf";

/// Environment variable overriding the OCR executable.
pub const OCR_PROGRAM_ENV: &str = "UNITEOCR_OCRMYPDF";

/// Environment variable naming the engine's language data directory.
pub const TESSDATA_ENV: &str = "TESSDATA_PREFIX";

/// Settings handed to the OCR engine on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Language packs, e.g. `hun+eng`. Passed through unvalidated.
    pub languages: String,
    /// Engine executable.
    pub program: PathBuf,
    /// Language data directory for the engine process, if overridden.
    pub tessdata_prefix: Option<PathBuf>,
    /// Leave pages that already contain text untouched.
    pub skip_text: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_string(),
            program: PathBuf::from(DEFAULT_OCR_PROGRAM),
            tessdata_prefix: None,
            skip_text: true,
        }
    }
}

impl OcrConfig {
    /// Defaults for `languages`, with the executable and data directory
    /// taken from the environment when set.
    pub fn from_env(languages: impl Into<String>) -> Self {
        Self::from_lookup(languages, |key| std::env::var_os(key))
    }

    fn from_lookup<F>(languages: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            languages: languages.into(),
            program: non_empty(OCR_PROGRAM_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OCR_PROGRAM)),
            tessdata_prefix: non_empty(TESSDATA_ENV).map(PathBuf::from),
            skip_text: true,
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Filename prefix selecting the inputs; `*` is implied at the end.
    pub prefix: String,
    /// OCR engine settings.
    pub ocr: OcrConfig,
}

impl Config {
    /// Build a config, rejecting a recursive prefix before any I/O happens.
    pub fn new(prefix: impl Into<String>, ocr: OcrConfig) -> Result<Self> {
        let prefix = prefix.into();
        naming::ensure_not_recursive(&prefix)?;
        Ok(Self { prefix, ocr })
    }
}

impl TryFrom<&Cli> for Config {
    type Error = UniteError;

    fn try_from(cli: &Cli) -> Result<Self> {
        Self::new(cli.file_prefix.clone(), OcrConfig::from_env(cli.languages.clone()))
    }
}
