//! Merging loaded documents into one page tree.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, info};

use super::outline::OutlineMerger;
use crate::error::{Result, UniteError};
use crate::io::PdfReader;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth, guards against cyclic `Parent` links.
const MAX_TREE_DEPTH: usize = 64;

/// One input that went into a merged document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    /// Path of the input file.
    pub path: PathBuf,
    /// Number of pages taken from it.
    pub pages: usize,
}

/// The in-memory result of a merge: the concatenated document and the
/// inputs it was built from, in order.
#[derive(Debug)]
pub struct MergedDocument {
    document: Document,
    sources: Vec<SourceSummary>,
}

impl MergedDocument {
    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        self.sources.iter().map(|s| s.pages).sum()
    }

    /// Inputs in merge order.
    pub fn sources(&self) -> &[SourceSummary] {
        &self.sources
    }

    /// Borrow the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the underlying document, as needed for saving.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Give up the wrapper and keep the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Concatenates PDF documents page by page.
pub struct PdfMerger;

impl PdfMerger {
    /// Merge `paths` into one document, in the order given.
    ///
    /// The result always gets a fresh catalog and a flat page tree. Every
    /// page of every input is appended, per-file page order preserved. The
    /// top-level outline items of the inputs are kept, in the same order.
    /// An empty `paths` slice yields a valid document with zero pages.
    ///
    /// # Errors
    ///
    /// - [`UniteError::FailedToLoadPdf`] if an input is not a decodable PDF.
    /// - [`UniteError::MergeFailed`] if an input has no usable page tree.
    pub fn merge(paths: &[PathBuf]) -> Result<MergedDocument> {
        let mut merged = Document::with_version("1.5");
        let pages_id = merged.new_object_id();

        let mut kids = Vec::new();
        let mut sources = Vec::with_capacity(paths.len());
        let mut outlines = OutlineMerger::new();

        for (idx, path) in paths.iter().enumerate() {
            debug!(
                path = %path.display(),
                index = idx + 1,
                total = paths.len(),
                "appending document"
            );

            let mut doc = PdfReader::read(path)?;
            doc.catalog().map_err(|err| {
                UniteError::merge_failed(format!("{} has no catalog: {err}", path.display()))
            })?;

            // Avoid object id collisions by renumbering the incoming document
            doc.renumber_objects_with(merged.max_id + 1);
            merged.max_id = merged.max_id.max(doc.max_id);

            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
            for &page_id in &page_ids {
                Self::inherit_page_attributes(&mut doc, page_id, path)?;
            }

            outlines.collect(&doc);

            if doc.version > merged.version {
                merged.version = doc.version.clone();
            }
            merged.objects.extend(doc.objects);

            for &page_id in &page_ids {
                merged
                    .get_object_mut(page_id)?
                    .as_dict_mut()?
                    .set("Parent", Object::Reference(pages_id));
                kids.push(Object::Reference(page_id));
            }

            sources.push(SourceSummary {
                path: path.clone(),
                pages: page_ids.len(),
            });
        }

        let count = kids.len() as i64;
        merged.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if let Some(outline_id) = outlines.attach(&mut merged)? {
            catalog.set("Outlines", outline_id);
        }
        let catalog_id = merged.add_object(catalog);
        merged.trailer.set("Root", catalog_id);

        // Catalogs and page tree nodes of the inputs are now unreachable
        merged.prune_objects();

        let result = MergedDocument {
            document: merged,
            sources,
        };
        info!(
            files = result.sources.len(),
            pages = result.page_count(),
            "merged documents in memory"
        );
        Ok(result)
    }

    /// Copy inheritable attributes from the page's ancestors onto the page
    /// itself, so it keeps them once re-parented under the new page tree.
    fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId, path: &Path) -> Result<()> {
        let page = Self::page_dict(doc, page_id, path)?;
        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
        let mut depth = 0;
        while let Some(node_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(node_id) else {
                break;
            };
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }

        if inherited.is_empty() {
            return Ok(());
        }

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            page.set(key, value);
        }
        Ok(())
    }

    fn page_dict<'a>(doc: &'a Document, page_id: ObjectId, path: &Path) -> Result<&'a Dictionary> {
        doc.get_dictionary(page_id).map_err(|err| {
            UniteError::merge_failed(format!(
                "{}: page object {page_id:?} is not a dictionary: {err}",
                path.display()
            ))
        })
    }
}
