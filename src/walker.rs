//! Input discovery.
//!
//! A prefix is expanded to `<prefix>*`, then narrowed to PDF files. The
//! result is sorted by the raw path bytes so `scan-10.pdf` sorts before
//! `scan-2.pdf`, exactly as a plain string sort would.

use std::path::PathBuf;

use glob::MatchOptions;
use tracing::debug;

use crate::error::Result;
use crate::naming::ensure_not_recursive;

const PDF_SUFFIX: &str = ".pdf";

/// Expand `prefix` into the sorted list of matching PDF paths.
///
/// No error is raised when nothing matches; an empty list comes back.
///
/// # Errors
///
/// - [`UniteError::RecursivePattern`](crate::UniteError::RecursivePattern) if
///   the prefix contains `**`.
/// - [`UniteError::InvalidGlob`](crate::UniteError::InvalidGlob) if the prefix
///   is not a valid glob pattern.
/// - [`UniteError::GlobEntry`](crate::UniteError::GlobEntry) if a matched
///   entry cannot be read.
pub fn resolve_pdf_paths(prefix: &str) -> Result<Vec<PathBuf>> {
    ensure_not_recursive(prefix)?;

    let pattern = format!("{prefix}*");
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut resolved_paths = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if is_pdf(&path) {
            debug!(path = %path.display(), "matched input");
            resolved_paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-PDF match");
        }
    }

    resolved_paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(resolved_paths)
}

fn is_pdf(path: &std::path::Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(PDF_SUFFIX)
}
