// src/models/collected_record.rs
use super::Document;

/// Content stored for a neighbor whose file could not be read.
pub const READ_ERROR_CONTENT: &str = "*Error reading file*";

/// One document included in a traversal result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedRecord {
    pub document: Document,
    /// Hop distance from the start document, which sits at depth 0.
    pub depth: usize,
    /// Body as read at collection time.
    pub content: String,
    /// Path of the document that discovered this one; `None` for the start.
    pub parent_path: Option<String>,
    /// Set when the file could not be read and `content` is [`READ_ERROR_CONTENT`].
    pub unreadable: bool,
}

impl CollectedRecord {
    #[inline]
    #[must_use]
    pub const fn start(document: Document, content: String) -> Self {
        Self {
            document,
            depth: 0,
            content,
            parent_path: None,
            unreadable: false,
        }
    }

    /// A record discovered through `parent`.
    #[inline]
    #[must_use]
    pub const fn discovered(
        document: Document,
        depth: usize,
        content: String,
        parent: String,
    ) -> Self {
        Self {
            document,
            depth,
            content,
            parent_path: Some(parent),
            unreadable: false,
        }
    }

    /// Stand-in for a neighbor whose file could not be read.
    #[inline]
    #[must_use]
    pub fn unreadable(document: Document, depth: usize, parent: String) -> Self {
        Self {
            document,
            depth,
            content: READ_ERROR_CONTENT.to_owned(),
            parent_path: Some(parent),
            unreadable: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.document.path
    }

    /// True for records whose content could not be read.
    #[inline]
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.unreadable
    }
}
