// src/core/links.rs
use std::collections::HashSet;

use crate::models::Document;

/// Source of link edges between documents.
pub trait LinkIndex {
    /// Documents that `document` links to.
    fn forward_links(&self, document: &Document) -> Vec<Document>;

    /// Documents that link to `document`.
    fn backlinks(&self, document: &Document) -> Vec<Document>;
}

/// Answers "which documents are directly related to this one" on top of a
/// [`LinkIndex`], optionally following backlinks. Only collectable documents
/// are returned, each at most once, forward links first.
pub struct LinkResolver<'a, I: ?Sized> {
    index: &'a I,
    include_backlinks: bool,
}

impl<'a, I: LinkIndex + ?Sized> LinkResolver<'a, I> {
    #[inline]
    #[must_use]
    pub const fn new(index: &'a I, include_backlinks: bool) -> Self {
        Self {
            index,
            include_backlinks,
        }
    }

    #[inline]
    #[must_use]
    pub const fn includes_backlinks(&self) -> bool {
        self.include_backlinks
    }

    #[must_use]
    pub fn related(&self, document: &Document) -> Vec<Document> {
        let forward = self.index.forward_links(document);
        let backward = if self.include_backlinks {
            self.index.backlinks(document)
        } else {
            Vec::new()
        };

        let mut seen = HashSet::new();
        forward
            .into_iter()
            .chain(backward)
            .filter(|candidate| candidate.is_collectable())
            .filter(|candidate| seen.insert(candidate.path.clone()))
            .collect()
    }
}
