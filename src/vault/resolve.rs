// src/vault/resolve.rs
use std::collections::HashMap;

use crate::models::Document;

/// Looks up link paths against the documents of a vault.
///
/// Matching is case-insensitive. A link path without extension also matches
/// the `.md` file of that name.
pub(super) struct LinkPathResolver<'a> {
    documents: &'a [Document],
    by_lower_path: HashMap<String, usize>,
}

impl<'a> LinkPathResolver<'a> {
    pub(super) fn new(documents: &'a [Document]) -> Self {
        let by_lower_path = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.path.to_lowercase(), i))
            .collect();
        Self {
            documents,
            by_lower_path,
        }
    }

    /// Finds the document a link in `source` points to.
    ///
    /// Tried in order: paths relative to the source (`./`, `../`), the exact
    /// vault path, the path inside the source's folder, then any document
    /// whose path ends with the link path. Ties in the last step go to the
    /// source's own folder, then the shortest path, then path order.
    pub(super) fn resolve(&self, link_path: &str, source: &Document) -> Option<&'a Document> {
        let link_path = link_path.trim();
        if link_path.is_empty() {
            return None;
        }

        if link_path.starts_with("./") || link_path.starts_with("../") {
            let joined = join_relative(source.folder(), link_path)?;
            return self.exact(&joined);
        }

        let link_path = link_path.trim_start_matches('/');
        if let Some(found) = self.exact(link_path) {
            return Some(found);
        }

        let folder = source.folder();
        if !folder.is_empty() {
            if let Some(found) = self.exact(&format!("{folder}/{link_path}")) {
                return Some(found);
            }
        }

        self.by_suffix(link_path, folder)
    }

    fn exact(&self, path: &str) -> Option<&'a Document> {
        let lower = path.to_lowercase();
        self.by_lower_path
            .get(&lower)
            .or_else(|| self.by_lower_path.get(&format!("{lower}.md")))
            .and_then(|&i| self.documents.get(i))
    }

    fn by_suffix(&self, link_path: &str, source_folder: &str) -> Option<&'a Document> {
        let lower = link_path.to_lowercase();
        let suffixes = [format!("/{lower}"), format!("/{lower}.md")];

        self.documents
            .iter()
            .filter(|doc| {
                let path = doc.path.to_lowercase();
                suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
            })
            .min_by(|a, b| {
                let a_remote = a.folder() != source_folder;
                let b_remote = b.folder() != source_folder;
                a_remote
                    .cmp(&b_remote)
                    .then_with(|| a.path.len().cmp(&b.path.len()))
                    .then_with(|| a.path.cmp(&b.path))
            })
    }
}

/// Joins a `./` or `../` link path onto a folder. `None` if it climbs above the root.
fn join_relative(folder: &str, link_path: &str) -> Option<String> {
    let mut parts: Vec<&str> = folder.split('/').filter(|p| !p.is_empty()).collect();
    for segment in link_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}
