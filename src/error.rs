//! Error types for uniteocr.
//!
//! Every failure in the pipeline maps to one variant of [`UniteError`].
//! Variants are grouped by the stage that raised them (see [`ErrorStage`]) so
//! callers can tell a rejected prefix, which never touches the disk, apart
//! from a collaborator failure in the middle of a run.

use std::io;
use std::path::PathBuf;

/// Result type alias for uniteocr operations.
pub type Result<T> = std::result::Result<T, UniteError>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// Input validation, before any I/O.
    Validation,
    /// Expanding the prefix into input files.
    Locate,
    /// Loading and concatenating input documents.
    Merge,
    /// Reading the confirmation answer.
    Prompt,
    /// Persisting the merged document.
    Write,
    /// Running the OCR engine over the written file.
    Ocr,
}

/// Why the OCR engine rejected a run, derived from its exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrFailureReason {
    /// A required dependency is missing, usually the language data.
    MissingDependency,
    /// The engine could not read the input file.
    InputFile,
    /// The input already carries a text layer.
    AlreadyDone,
    /// The input is encrypted.
    Encrypted,
    /// The engine was interrupted by a signal.
    Interrupted,
    /// Any other engine failure.
    Engine,
}

impl OcrFailureReason {
    /// Classify an `ocrmypdf` exit code.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(2) => Self::InputFile,
            Some(3) => Self::MissingDependency,
            Some(6) => Self::AlreadyDone,
            Some(8) => Self::Encrypted,
            Some(130) | None => Self::Interrupted,
            Some(_) => Self::Engine,
        }
    }
}

impl std::fmt::Display for OcrFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingDependency => "missing dependency (is the language pack installed?)",
            Self::InputFile => "input file could not be read",
            Self::AlreadyDone => "page already contains text",
            Self::Encrypted => "input is encrypted",
            Self::Interrupted => "interrupted",
            Self::Engine => "engine failure",
        };
        f.write_str(text)
    }
}

/// Main error type for uniteocr operations.
#[derive(Debug, thiserror::Error)]
pub enum UniteError {
    /// The prefix contains a recursive glob marker.
    #[error("File pattern cannot be recursive: {prefix}")]
    RecursivePattern {
        /// The rejected prefix.
        prefix: String,
    },

    /// The prefix does not form a valid glob pattern.
    #[error("Invalid file pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    /// A matched entry could not be inspected.
    #[error("Failed to process glob entry: {0}")]
    GlobEntry(#[from] glob::GlobError),

    /// A matched file is not a decodable PDF.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF parser.
        reason: String,
    },

    /// An input decoded but its page tree could not be merged.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The destination file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Serializing or flushing the document failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The OCR executable could not be started.
    #[error("OCR engine '{}' could not be started: {source}", .program.display())]
    OcrUnavailable {
        /// Executable that was tried.
        program: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The OCR engine ran and failed. The merged file is left as written.
    #[error(
        "OCR failed for {} ({reason}, exit code {})\n  The merged file was written without a text layer.{}",
        .path.display(),
        describe_exit_code(.code),
        describe_engine_output(.stderr)
    )]
    OcrFailed {
        /// File the engine was run on.
        path: PathBuf,
        /// Exit code, if the engine exited normally.
        code: Option<i32>,
        /// Classified failure reason.
        reason: OcrFailureReason,
        /// Trimmed standard error of the engine.
        stderr: String,
    },

    /// The confirmation answer could not be read.
    #[error("Failed to read confirmation: {0}")]
    FailedToReadConfirmation(#[source] io::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl UniteError {
    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Stage of the pipeline this error belongs to.
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::RecursivePattern { .. } | Self::InvalidGlob(_) => ErrorStage::Validation,
            Self::GlobEntry(_) => ErrorStage::Locate,
            Self::FailedToLoadPdf { .. } | Self::MergeFailed { .. } => ErrorStage::Merge,
            Self::FailedToReadConfirmation(_) => ErrorStage::Prompt,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } | Self::Io(_) => {
                ErrorStage::Write
            }
            Self::OcrUnavailable { .. } | Self::OcrFailed { .. } => ErrorStage::Ocr,
        }
    }

    /// True when the error was raised before anything touched the filesystem.
    pub fn is_pre_io(&self) -> bool {
        self.stage() == ErrorStage::Validation
    }
}

fn describe_exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

fn describe_engine_output(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n  Engine output: {stderr}")
    }
}

impl From<lopdf::Error> for UniteError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}
