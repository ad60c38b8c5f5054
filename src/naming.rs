//! Output file naming.
//!
//! The destination of a merge is derived from the same prefix that selects
//! the inputs. A trailing zero-padded page counter such as `-001` or `-0`,
//! a bare trailing `-`, and a trailing `*` are replaced with `.pdf`. Anything
//! else simply gets `.pdf` appended.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, UniteError};

/// Marker for recursive directory matching in glob patterns.
pub const RECURSIVE_MARKER: &str = "**";

/// Optional `-` with a zero-led counter, optional `*`, anchored at the end.
static TRAILING_COUNTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-(?:0+[0-9]*)?)?\*?$").expect("trailing counter pattern is valid")
});

/// Reject prefixes that would make the glob descend into subdirectories.
pub fn ensure_not_recursive(prefix: &str) -> Result<()> {
    if prefix.contains(RECURSIVE_MARKER) {
        return Err(UniteError::RecursivePattern {
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}

/// Derive the output path for `prefix`.
///
/// # Errors
///
/// Returns [`UniteError::RecursivePattern`] if the prefix contains `**`.
///
/// # Examples
///
/// ```
/// use uniteocr::naming::output_path;
/// use std::path::PathBuf;
///
/// assert_eq!(output_path("scan-001").unwrap(), PathBuf::from("scan.pdf"));
/// assert_eq!(output_path("scan-*").unwrap(), PathBuf::from("scan.pdf"));
/// assert_eq!(output_path("report").unwrap(), PathBuf::from("report.pdf"));
/// assert!(output_path("docs/**").is_err());
/// ```
pub fn output_path(prefix: &str) -> Result<PathBuf> {
    ensure_not_recursive(prefix)?;

    // The pattern can match the empty string at the end, so exactly one
    // replacement always happens.
    let name = TRAILING_COUNTER.replacen(prefix, 1, ".pdf");
    Ok(PathBuf::from(name.into_owned()))
}
