// src/core/changes.rs
use std::collections::HashSet;

use crate::models::CollectedRecord;

/// Set of document paths in a collection.
#[must_use]
pub fn path_set(records: &[CollectedRecord]) -> HashSet<String> {
    records.iter().map(|r| r.document.path.clone()).collect()
}

/// Reports whether a new collection covers a different set of documents than
/// the previous one. Order does not matter.
#[must_use]
pub fn has_changed(previous: &HashSet<String>, records: &[CollectedRecord]) -> bool {
    let current: HashSet<&str> = records.iter().map(CollectedRecord::path).collect();
    current.len() != previous.len() || current.iter().any(|path| !previous.contains(*path))
}
