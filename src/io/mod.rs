//! File I/O for uniteocr.
//!
//! Loading input PDFs and persisting the merged document.

pub mod reader;
pub mod writer;

pub use reader::PdfReader;
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
