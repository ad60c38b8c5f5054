//! Loading input PDFs.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::error::{Result, UniteError};

/// Loads input PDFs from disk.
pub struct PdfReader;

impl PdfReader {
    /// Load and decode the PDF at `path`.
    ///
    /// Any parser failure, including a missing or unreadable file, is
    /// reported as [`UniteError::FailedToLoadPdf`] so the caller sees which
    /// input broke the merge.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Document> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .map_err(|err| UniteError::failed_to_load_pdf(path.to_path_buf(), err.to_string()))?;

        debug!(path = %path.display(), pages = doc.get_pages().len(), "loaded input");
        Ok(doc)
    }
}
