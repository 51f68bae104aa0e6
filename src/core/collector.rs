// src/core/collector.rs
use std::collections::{HashSet, VecDeque};
use std::io;

use crate::core::links::{LinkIndex, LinkResolver};
use crate::error::CollectionError;
use crate::models::{CollectedRecord, Document};

/// Reads document bodies from wherever the documents live.
pub trait DocumentStore {
    /// # Errors
    ///
    /// Returns an error if the document cannot be read as text.
    fn read(&self, document: &Document) -> io::Result<String>;
}

/// Collects the neighborhood of `start` breadth-first, up to `max_depth` hops.
///
/// Records come out in discovery order: by ascending depth, and within a depth
/// in the order the previous frontier was expanded. A document is attributed
/// to the first document that discovers it. Neighbors that cannot be read are
/// kept with [`crate::models::READ_ERROR_CONTENT`] as content and are not expanded further.
///
/// # Arguments
///
/// * `start` - The document the traversal starts from (depth 0)
/// * `max_depth` - The maximum hop distance to collect
/// * `resolver` - Provides the related documents of each expanded document
/// * `is_excluded` - Called with a candidate path; `true` skips it and its subtree
/// * `store` - Reads document contents
///
/// # Returns
///
/// * `Ok(Vec<CollectedRecord>)` - The start document followed by every reachable neighbor
///
/// # Errors
///
/// Returns [`CollectionError::StartUnreadable`] if the start document cannot be
/// read. No partial result is returned in that case.
pub fn collect<I, S, F>(
    start: &Document,
    max_depth: usize,
    resolver: &LinkResolver<'_, I>,
    is_excluded: F,
    store: &S,
) -> Result<Vec<CollectedRecord>, CollectionError>
where
    I: LinkIndex + ?Sized,
    S: DocumentStore + ?Sized,
    F: Fn(&str) -> bool,
{
    log::debug!(
        "Starting collection from {} with depth {max_depth}",
        start.path
    );

    let start_content = store
        .read(start)
        .map_err(|source| CollectionError::StartUnreadable {
            path: start.path.clone(),
            source,
        })?;

    let mut collected = vec![CollectedRecord::start(start.clone(), start_content)];
    let mut visited: HashSet<String> = HashSet::from([start.path.clone()]);
    let mut queue: VecDeque<(Document, usize)> = VecDeque::from([(start.clone(), 0)]);

    while let Some((document, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        let child_depth = depth.saturating_add(1);
        for neighbor in resolver.related(&document) {
            if visited.contains(&neighbor.path) || is_excluded(&neighbor.path) {
                continue;
            }
            visited.insert(neighbor.path.clone());

            match store.read(&neighbor) {
                Ok(content) => {
                    collected.push(CollectedRecord::discovered(
                        neighbor.clone(),
                        child_depth,
                        content,
                        document.path.clone(),
                    ));
                    queue.push_back((neighbor, child_depth));
                }
                Err(err) => {
                    log::warn!("Error reading file {}: {err}", neighbor.path);
                    collected.push(CollectedRecord::unreadable(
                        neighbor,
                        child_depth,
                        document.path.clone(),
                    ));
                }
            }
        }
    }

    log::info!("Collected {} notes", collected.len());
    Ok(collected)
}
