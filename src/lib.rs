//! uniteocr - merge a run of scanned PDF files and add an OCR text layer.
//!
//! All PDFs whose path starts with a prefix are merged in alphabetical order
//! into one document. After an interactive confirmation the result is written
//! next to the inputs, named after the prefix, and handed to an OCR engine
//! that adds a text layer in place.
//!
//! # Examples
//!
//! ```no_run
//! use uniteocr::config::{Config, OcrConfig};
//! use uniteocr::ocr::OcrMyPdf;
//! use uniteocr::pipeline::{Pipeline, RunOutcome};
//!
//! # fn example() -> uniteocr::Result<()> {
//! let config = Config::new("scans/letter-0", OcrConfig::from_env("deu+eng"))?;
//! let pipeline = Pipeline::new(config, OcrMyPdf);
//!
//! let stdin = std::io::stdin();
//! match pipeline.run(&mut stdin.lock(), &mut std::io::stdout())? {
//!     RunOutcome::Completed { output, .. } => println!("wrote {}", output.display()),
//!     RunOutcome::Aborted { .. } => println!("nothing written"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod naming;
pub mod ocr;
pub mod pipeline;
pub mod prompt;
pub mod walker;

pub use config::Config;
pub use error::{ErrorStage, Result, UniteError};

use crate::{cli::Cli, ocr::OcrMyPdf, pipeline::Pipeline, pipeline::RunOutcome};

/// Run the tool for parsed CLI arguments, prompting on the terminal.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let config = Config::try_from(cli)?;
    let pipeline = Pipeline::new(config, OcrMyPdf);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    pipeline.run(&mut stdin.lock(), &mut stdout)
}
