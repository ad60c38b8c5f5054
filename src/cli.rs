//! CLI argument parsing for uniteocr.

use clap::Parser;

use crate::config::DEFAULT_LANGUAGES;

/// Merge and OCR PDF files.
///
/// Every PDF whose path starts with FILE_PREFIX is merged in alphabetical
/// order. After confirmation the result is written next to the inputs and
/// a text layer is added to pages that do not already have one.
#[derive(Parser, Debug)]
#[command(name = "uniteocr")]
#[command(version)]
#[command(about = "Merge and OCR PDF files", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Path and file name prefix matching all the PDF files
    ///
    /// An asterisk (*) is implied at the end. A trailing page counter such
    /// as `-0` or `-001` is dropped from the output name.
    ///
    /// Examples:
    ///   uniteocr scans/invoice-0
    ///   uniteocr 'scans/letter-*' deu+eng
    #[arg(value_name = "FILE_PREFIX")]
    pub file_prefix: String,

    /// Languages of the documents, e.g. hun+eng
    ///
    /// Find available languages with `tesseract --list-langs`.
    #[arg(
        value_name = "LANGUAGES",
        default_value = DEFAULT_LANGUAGES,
        env = "UNITEOCR_LANGUAGES"
    )]
    pub languages: String,
}
