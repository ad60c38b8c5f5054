//! Interactive confirmation before anything is written.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{Result, UniteError};

/// The only answer that lets the run continue.
const YES: &str = "y";

/// Ask whether the merged document should be written to `target`.
///
/// Prints the question to `output`, then blocks on one line from `input`.
/// Only the exact answer `y` confirms; the line terminator is stripped but
/// nothing else is, so `Y`, `yes`, ` y` and an empty line all decline, as
/// does end of input.
///
/// # Errors
///
/// Returns [`UniteError::FailedToReadConfirmation`] if the prompt cannot be
/// written or the answer cannot be read.
pub fn confirm_write<R, W>(input: &mut R, output: &mut W, target: &Path) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(
        output,
        "Write to target location '{}'? (y/n) ",
        target.display()
    )
    .and_then(|_| output.flush())
    .map_err(UniteError::FailedToReadConfirmation)?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(UniteError::FailedToReadConfirmation)?;

    let answer = answer.trim_end_matches(['\n', '\r']);
    Ok(answer == YES)
}
