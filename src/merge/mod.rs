//! Page-level concatenation of PDF documents.

pub mod merger;
pub mod outline;

pub use merger::{MergedDocument, PdfMerger, SourceSummary};
pub use outline::OutlineMerger;
