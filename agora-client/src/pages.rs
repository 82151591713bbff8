use std::collections::BTreeMap;

use crate::api::Pagination;

/// Aggregation of a paginated listing as pages arrive, keyed explicitly by
/// page number so iteration order never depends on arrival order.
///
/// Used for the thread listing (infinite scroll keeps appending pages) and
/// the notification history. Re-recording a page replaces its previous
/// contents, which is what a refetch of an already-loaded page should do.
#[derive(Clone, Debug)]
pub struct Paged<T> {
    pages: BTreeMap<u32, Vec<T>>,
    has_more: bool,
}

impl<T> Default for Paged<T> {
    fn default() -> Paged<T> {
        Paged::new()
    }
}

impl<T> Paged<T> {
    pub fn new() -> Paged<T> {
        Paged {
            pages: BTreeMap::new(),
            has_more: true,
        }
    }

    /// Records one page of results. An empty page ends pagination without
    /// being stored; otherwise `has_more` follows the server's envelope.
    pub fn record(&mut self, page: u32, items: Vec<T>, pagination: &Pagination) {
        if items.is_empty() {
            self.has_more = false;
            return;
        }
        self.pages.insert(page, items);
        self.has_more = pagination.has_next_page;
    }

    /// Whether another page is worth requesting
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All loaded items, flattened in increasing page order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pages.values().flat_map(|items| items.iter())
    }
}
