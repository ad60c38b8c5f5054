//! Carrying document outlines (bookmarks) into the merged document.
//!
//! The top-level items of every input's outline are spliced, in input
//! order, under one fresh outline root. Items keep their children and
//! destinations; only the sibling links and the parent of the top-level
//! items are rewritten.

use std::collections::HashSet;

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::error::Result;

/// Collects outline items from renumbered inputs and links them into the
/// merged document.
#[derive(Debug, Default)]
pub struct OutlineMerger {
    items: Vec<ObjectId>,
    visible: i64,
}

impl OutlineMerger {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the top-level outline items of `doc`.
    ///
    /// Must be called after `doc` was renumbered into the merged id space
    /// and before its objects are moved into the merged document. Inputs
    /// without an outline, or with a broken one, contribute nothing.
    pub fn collect(&mut self, doc: &Document) {
        let Some(root) = doc
            .catalog()
            .ok()
            .and_then(|catalog| catalog.get(b"Outlines").ok())
            .and_then(|outlines| outlines.as_reference().ok())
            .and_then(|id| doc.get_dictionary(id).ok())
        else {
            return;
        };

        let mut seen = HashSet::new();
        let mut next = root.get(b"First").and_then(Object::as_reference).ok();
        let first_new = self.items.len();
        while let Some(item_id) = next {
            if !seen.insert(item_id) {
                break;
            }
            let Ok(item) = doc.get_dictionary(item_id) else {
                break;
            };
            self.items.push(item_id);
            next = item.get(b"Next").and_then(Object::as_reference).ok();
        }

        let added = (self.items.len() - first_new) as i64;
        let visible = root
            .get(b"Count")
            .and_then(Object::as_i64)
            .ok()
            .filter(|count| *count > 0)
            .unwrap_or(added);
        self.visible += visible;
        debug!(items = added, "collected outline items");
    }

    /// Link the collected items under a new outline root in `merged`.
    ///
    /// Returns the root to reference from the catalog, or `None` when there
    /// was nothing to link.
    pub fn attach(self, merged: &mut Document) -> Result<Option<ObjectId>> {
        let (Some(&first), Some(&last)) = (self.items.first(), self.items.last()) else {
            return Ok(None);
        };

        let root_id = merged.new_object_id();
        for (idx, &item_id) in self.items.iter().enumerate() {
            let item = merged.get_object_mut(item_id)?.as_dict_mut()?;
            item.set("Parent", Object::Reference(root_id));
            match idx.checked_sub(1).map(|prev| self.items[prev]) {
                Some(prev) => item.set("Prev", Object::Reference(prev)),
                None => {
                    item.remove(b"Prev");
                }
            }
            match self.items.get(idx + 1) {
                Some(&next) => item.set("Next", Object::Reference(next)),
                None => {
                    item.remove(b"Next");
                }
            }
        }

        merged.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => first,
                "Last" => last,
                "Count" => self.visible,
            }),
        );
        Ok(Some(root_id))
    }
}
