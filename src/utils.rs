// src/utils.rs
use crate::models::CollectedRecord;

const FRONTMATTER_DELIMITER: &str = "---";

/// Splits a leading frontmatter block off a note.
///
/// The block must open on the very first line with `---` and close with a
/// line holding only `---`. Returns `(block, body)` where `block` is the text
/// between the delimiters and `body` everything after the closing line.
#[must_use]
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let after_open = content.strip_prefix(FRONTMATTER_DELIMITER)?;
    let after_open = after_open.trim_start_matches([' ', '\t']);
    let block_start = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))?;

    let start = content.len().saturating_sub(block_start.len());
    let mut offset = start;
    for line in block_start.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let block = content.get(start..offset)?;
            let body = content.get(offset.saturating_add(line.len())..)?;
            return Some((block, body));
        }
        offset = offset.saturating_add(line.len());
    }

    None
}

/// Returns the note body without its frontmatter block, or the whole note.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).map_or(content, |(_, body)| body)
}

pub fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
}

/// Normalizes a vault path: forward slashes only, no repeated or leading
/// separators. A trailing separator is kept so folder patterns survive.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let mut normalized = String::with_capacity(unified.len());
    let mut previous_slash = false;
    for ch in unified.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        normalized.push(ch);
    }
    normalized.trim_start_matches('/').to_owned()
}

/// Normalizes an export filename and makes sure it ends in `.md`.
#[must_use]
pub fn normalize_output_filename(raw: &str) -> String {
    let normalized = normalize_path(raw);
    let normalized = normalized.trim_end_matches('/');
    if normalized.ends_with(".md") {
        normalized.to_owned()
    } else {
        format!("{normalized}.md")
    }
}

pub fn print_collection(records: &[CollectedRecord]) {
    for record in records {
        let indent = "  ".repeat(record.depth);
        let marker = if record.is_placeholder() { " (unreadable)" } else { "" };
        println!("{indent}{} [{}]{marker}", record.document.name, record.path());
    }
}
