//! The merge-then-OCR run.
//!
//! A run moves through `LOCATE -> MERGE -> NAME -> PROMPT`, then either
//! `WRITE -> OCR -> DONE` or stops at `ABORTED`. Nothing is retried; the
//! first error ends the run. If OCR fails, the merged file already written
//! stays on disk as the output of the run.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::io::PdfWriter;
use crate::merge::PdfMerger;
use crate::ocr::OcrEngine;
use crate::{naming, prompt, walker};

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The merged file was written and OCR'd.
    Completed {
        /// Where the result lives.
        output: PathBuf,
        /// Number of input files merged.
        files: usize,
        /// Number of pages in the result.
        pages: usize,
    },
    /// The user declined; nothing was written.
    Aborted {
        /// Where the result would have gone.
        output: PathBuf,
    },
}

/// One configured merge-and-OCR run.
pub struct Pipeline<E> {
    config: Config,
    engine: E,
    writer: PdfWriter,
}

impl<E: OcrEngine> Pipeline<E> {
    /// Create a pipeline using `engine` for text recognition.
    pub fn new(config: Config, engine: E) -> Self {
        Self {
            config,
            engine,
            writer: PdfWriter::new(),
        }
    }

    /// Execute the run, asking for confirmation on `input`/`output`.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<RunOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let files = walker::resolve_pdf_paths(&self.config.prefix)?;
        info!(prefix = %self.config.prefix, count = files.len(), "located input files");

        let mut merged = PdfMerger::merge(&files)?;
        let target = naming::output_path(&self.config.prefix)?;

        if !prompt::confirm_write(input, output, &target)? {
            info!(target = %target.display(), "not confirmed, nothing written");
            return Ok(RunOutcome::Aborted { output: target });
        }

        let stats = self.writer.write(merged.document_mut(), &target)?;
        let pages = merged.page_count();
        drop(merged);
        info!(
            target = %stats.output_path.display(),
            pages,
            bytes = stats.file_size,
            "merged PDF written, running OCR"
        );

        self.engine.recognize(&target, &self.config.ocr)?;
        info!(target = %target.display(), "all done");

        Ok(RunOutcome::Completed {
            output: target,
            files: files.len(),
            pages,
        })
    }
}
