//! The process-wide queue of submitted content items.

use std::sync::{PoisonError, RwLock};

use crate::domain::content::ContentItem;

/// Append-only, insertion-ordered store of content items.
///
/// Owned by the application context and passed around by `Arc` so tests can
/// build isolated instances. The queue lives for the process lifetime with
/// no eviction or size bound.
#[derive(Debug, Default)]
pub struct ContentStore {
    items: RwLock<Vec<ContentItem>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return the new queue length.
    pub fn push(&self, item: ContentItem) -> usize {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        items.push(item);
        items.len()
    }

    /// A point-in-time copy of the queue. Compositions iterate this snapshot
    /// so concurrent submissions are never half-observed mid-render.
    pub fn snapshot(&self) -> Vec<ContentItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
