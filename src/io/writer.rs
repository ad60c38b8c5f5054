//! Writing the merged document to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lopdf::Document;
use tracing::debug;

use crate::error::{Result, UniteError};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a sibling temp file, then rename over the destination.
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Renumber objects densely before writing.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// Serializes a PDF document to a file.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write `doc` to `path`, replacing any existing file there.
    ///
    /// Missing parent directories are created. With atomic writes enabled the
    /// destination is only touched once the whole document has been flushed,
    /// so a failed write never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns [`UniteError::FailedToCreateOutput`] if the file cannot be
    /// created and [`UniteError::FailedToWrite`] if serialization, flushing,
    /// or the final rename fails.
    pub fn write(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| UniteError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
        }

        if self.options.optimize {
            doc.renumber_objects();
        }
        if self.options.compress {
            doc.compress();
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        let file = File::create(&write_path).map_err(|source| UniteError::FailedToCreateOutput {
            path: write_path.clone(),
            source,
        })?;
        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);

        let written = doc
            .save_to(&mut writer)
            .map_err(|err| err.to_string())
            .and_then(|_| writer.flush().map_err(|err| err.to_string()));
        if let Err(reason) = written {
            if self.options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(UniteError::FailedToWrite {
                path: write_path,
                source: std::io::Error::other(reason),
            });
        }
        drop(writer);

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|source| UniteError::FailedToWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let file_size = std::fs::metadata(path)
            .map_err(|source| UniteError::FailedToWrite {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
        };
        debug!(
            path = %path.display(),
            bytes = stats.file_size,
            elapsed_ms = stats.write_time.as_millis() as u64,
            "document written"
        );

        Ok(stats)
    }
}

/// `scan.pdf` -> `scan.pdf.tmp`, in the same directory so the rename stays
/// on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
