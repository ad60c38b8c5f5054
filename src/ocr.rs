//! Text recognition over the written output.
//!
//! OCR itself is delegated to an external engine. [`OcrEngine`] is the seam
//! the pipeline talks to; [`OcrMyPdf`] drives the `ocrmypdf` executable,
//! which rewrites the file in place and, with `--skip-text`, leaves pages
//! that already carry a text layer alone.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::OcrConfig;
use crate::error::{OcrFailureReason, Result, UniteError};

/// Lines of engine stderr kept in the error message.
const STDERR_TAIL_LINES: usize = 12;

/// Something that can add a text layer to a PDF, in place.
pub trait OcrEngine {
    /// Run recognition over `path`, overwriting it with the result.
    fn recognize(&self, path: &Path, config: &OcrConfig) -> Result<()>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for &T {
    fn recognize(&self, path: &Path, config: &OcrConfig) -> Result<()> {
        (**self).recognize(path, config)
    }
}

/// Runs the `ocrmypdf` command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcrMyPdf;

impl OcrMyPdf {
    /// Build the engine invocation for `path`.
    pub fn command(path: &Path, config: &OcrConfig) -> Command {
        let mut cmd = Command::new(&config.program);
        if config.skip_text {
            cmd.arg("--skip-text");
        }
        cmd.arg("-l").arg(&config.languages).arg(path).arg(path);

        if let Some(tessdata) = &config.tessdata_prefix {
            cmd.env("TESSDATA_PREFIX", tessdata);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        cmd
    }
}

impl OcrEngine for OcrMyPdf {
    fn recognize(&self, path: &Path, config: &OcrConfig) -> Result<()> {
        let mut cmd = Self::command(path, config);
        debug!(command = ?cmd, "starting OCR engine");
        info!(
            path = %path.display(),
            languages = %config.languages,
            "running OCR"
        );

        let output = cmd.output().map_err(|source| UniteError::OcrUnavailable {
            program: config.program.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        let code = output.status.code();
        Err(UniteError::OcrFailed {
            path: path.to_path_buf(),
            code,
            reason: OcrFailureReason::from_exit_code(code),
            stderr: stderr_tail(&output.stderr),
        })
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n").trim().to_string()
}
