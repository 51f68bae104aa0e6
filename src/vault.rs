// src/vault.rs
mod parser;
mod resolve;

use anyhow::{Context as _, Result};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::collector::DocumentStore;
use crate::core::export::{ExportStore, SaveOutcome};
use crate::core::links::LinkIndex;
use crate::models::Document;
use crate::utils::{is_hidden, normalize_path};
use parser::extract_link_targets;
use resolve::LinkPathResolver;

/// A directory of notes, indexed for link traversal.
///
/// Opening a vault scans every non-hidden file once and records which
/// documents link to which. Note contents are read again on demand through
/// [`DocumentStore`], so a collection sees the files as they are at
/// collection time.
#[derive(Debug)]
pub struct Vault {
    root: PathBuf,
    documents: Vec<Document>,
    by_path: HashMap<String, usize>,
    forward: HashMap<String, Vec<String>>,
    backward: HashMap<String, Vec<String>>,
}

impl Vault {
    /// Scans `dir` and builds the link index.
    ///
    /// # Arguments
    ///
    /// * `dir` - The vault root, absolute or relative to the current directory
    ///
    /// # Returns
    ///
    /// * `Ok(Vault)` - The indexed vault
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * The current directory cannot be determined for a relative `dir`
    /// * The directory cannot be accessed or read
    /// * File system operations fail during traversal
    #[inline]
    pub fn open(dir: &Path) -> Result<Self> {
        let root = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            env::current_dir()?.join(dir)
        };

        let mut documents = Vec::new();
        for entry in WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry =
                entry.with_context(|| format!("Failed to scan vault: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(path) = relative_vault_path(&root, entry.path()) {
                documents.push(Document::from_path(&path));
            }
        }
        documents.sort_by(|a, b| a.path.cmp(&b.path));

        let mut vault = Self {
            by_path: documents
                .iter()
                .enumerate()
                .map(|(i, doc)| (doc.path.clone(), i))
                .collect(),
            root,
            documents,
            forward: HashMap::new(),
            backward: HashMap::new(),
        };
        vault.index_links();

        log::info!(
            "Indexed {} files in {}",
            vault.documents.len(),
            vault.root.display()
        );
        Ok(vault)
    }

    fn index_links(&mut self) {
        let resolver = LinkPathResolver::new(&self.documents);
        let mut forward: HashMap<String, Vec<String>> = HashMap::new();
        let mut backward: HashMap<String, Vec<String>> = HashMap::new();

        for source in self.documents.iter().filter(|doc| doc.is_collectable()) {
            let content = match fs::read_to_string(self.root.join(&source.path)) {
                Ok(content) => content,
                Err(err) => {
                    log::warn!("Skipping links of {}: {err}", source.path);
                    continue;
                }
            };

            let mut seen = HashSet::new();
            for link_path in extract_link_targets(&content) {
                let Some(target) = resolver.resolve(&link_path, source) else {
                    log::debug!("Unresolved link {link_path:?} in {}", source.path);
                    continue;
                };
                if !seen.insert(target.path.clone()) {
                    continue;
                }
                forward
                    .entry(source.path.clone())
                    .or_default()
                    .push(target.path.clone());
                // sources are visited in path order, so backlinks stay sorted
                backward
                    .entry(target.path.clone())
                    .or_default()
                    .push(source.path.clone());
            }
        }

        self.forward = forward;
        self.backward = backward;
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Finds a document by vault path.
    ///
    /// Accepts OS separators, a missing `.md` suffix, or an absolute path
    /// inside the vault root.
    #[must_use]
    pub fn document(&self, query: &str) -> Option<&Document> {
        let as_path = Path::new(query);
        let relative = if as_path.is_absolute() {
            relative_vault_path(&self.root, as_path)?
        } else {
            normalize_path(query)
        };

        self.by_path
            .get(&relative)
            .or_else(|| self.by_path.get(&format!("{relative}.md")))
            .and_then(|&i| self.documents.get(i))
    }

    fn lookup(&self, paths: Option<&Vec<String>>) -> Vec<Document> {
        paths
            .into_iter()
            .flatten()
            .filter_map(|path| self.by_path.get(path))
            .filter_map(|&i| self.documents.get(i).cloned())
            .collect()
    }
}

impl LinkIndex for Vault {
    fn forward_links(&self, document: &Document) -> Vec<Document> {
        self.lookup(self.forward.get(&document.path))
    }

    fn backlinks(&self, document: &Document) -> Vec<Document> {
        self.lookup(self.backward.get(&document.path))
    }
}

impl DocumentStore for Vault {
    fn read(&self, document: &Document) -> io::Result<String> {
        fs::read_to_string(self.root.join(&document.path))
    }
}

impl ExportStore for Vault {
    fn save(&self, path: &str, content: &str) -> io::Result<SaveOutcome> {
        let target = self.root.join(path);
        let outcome = if target.is_file() {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Created
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        Ok(outcome)
    }
}

fn relative_vault_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    (!joined.is_empty()).then_some(joined)
}
