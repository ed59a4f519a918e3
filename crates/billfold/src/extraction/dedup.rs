//! Document-wide near-duplicate removal.
//!
//! Single forward pass over the flattened, page-ordered item sequence. The
//! first occurrence wins: a later item whose normalized name is more than
//! 90% similar to any kept name is dropped outright, with no field merging,
//! and its name is not added to the seen set. O(n²) in the item count.

use crate::types::{LineItem, PageData};

/// Similarity above which two item names are the same item.
const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Forward-pass duplicate filter keyed on normalized item names.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_names: Vec<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `item` survives, recording its name when it does.
    pub fn keep(&mut self, item: &LineItem) -> bool {
        let name_key = item.name.to_lowercase().trim().to_string();

        let is_duplicate = self
            .seen_names
            .iter()
            .any(|seen| strsim::normalized_levenshtein(&name_key, seen) > SIMILARITY_THRESHOLD);

        if is_duplicate {
            return false;
        }

        self.seen_names.push(name_key);
        true
    }

    /// Filter a flattened item sequence, preserving relative order among
    /// kept items.
    pub fn deduplicate_items(items: Vec<LineItem>) -> Vec<LineItem> {
        let mut dedup = Deduplicator::new();
        items.into_iter().filter(|item| dedup.keep(item)).collect()
    }

    /// Apply the same forward pass across pages in page order, so the
    /// per-page lists reflect the post-dedup document.
    pub fn deduplicate_pages(pages: &mut [PageData]) {
        let mut dedup = Deduplicator::new();
        for page in pages.iter_mut() {
            page.bill_items.retain(|item| dedup.keep(item));
        }
    }
}
