// src/models/document.rs
use std::fmt;

/// Whether a document takes part in collection and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Markdown,
    Attachment,
}

/// A reference to a file inside the vault.
///
/// The path is vault-relative, uses `/` as separator and identifies the
/// document uniquely. The name is the file stem, used as display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    pub path: String,
    pub name: String,
    pub kind: DocumentKind,
}

impl Document {
    /// Builds a document from a vault-relative path, deriving name and kind.
    #[inline]
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let (name, kind) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let kind = if ext.eq_ignore_ascii_case("md") {
                    DocumentKind::Markdown
                } else {
                    DocumentKind::Attachment
                };
                (stem, kind)
            }
            _ => (file_name, DocumentKind::Attachment),
        };
        Self {
            path: path.to_owned(),
            name: name.to_owned(),
            kind,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_collectable(&self) -> bool {
        self.kind == DocumentKind::Markdown
    }

    /// Folder part of the path, without trailing separator. Empty at the vault root.
    #[inline]
    #[must_use]
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(folder, _)| folder)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
