// src/core/export.rs
use std::collections::BTreeMap;
use std::io::{self, Write as _};

use crate::models::CollectedRecord;
use crate::utils::strip_frontmatter;

/// Returned instead of an export when nothing was collected.
pub const NO_RELATED_FILES: &str = "No related files found.";

/// Four backticks, so notes containing ordinary ``` fences stay inside the wrapper.
const CONTENT_FENCE: &str = "````";

/// Result of writing an export to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Named-file destination for exports.
pub trait ExportStore {
    /// Writes `content` to `path`, replacing an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, path: &str, content: &str) -> io::Result<SaveOutcome>;
}

/// Clipboard-like destination for exports.
pub trait ClipboardSink {
    /// # Errors
    ///
    /// Returns an error if the text cannot be delivered.
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Clipboard stand-in for terminals: the export goes to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

impl ClipboardSink for StdoutClipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// Renders a collection as one Markdown document grouped by depth.
///
/// The output is a pure function of the inputs: sections appear by ascending
/// depth, records within a section keep their collection order.
#[must_use]
pub fn format_export(records: &[CollectedRecord], max_depth: usize, start_name: &str) -> String {
    if records.is_empty() {
        return NO_RELATED_FILES.to_owned();
    }

    let mut md = String::from("# Context for AI\n\n");
    md.push_str(&format!(
        "These are related files around \"**{start_name}**\" up to **{max_depth}** hops:\n\n"
    ));
    for depth in 0..=max_depth {
        md.push_str(&format!("- Depth {depth}: {}\n", depth_description(depth)));
    }
    md.push_str("\n---\n\n");

    let mut by_depth: BTreeMap<usize, Vec<&CollectedRecord>> = BTreeMap::new();
    for record in records {
        by_depth.entry(record.depth).or_default().push(record);
    }

    for (depth, group) in by_depth.range(..=max_depth) {
        md.push_str(&format!(
            "## {} (Depth {depth})\n\n",
            section_title(*depth, start_name)
        ));

        for record in group {
            let body = strip_frontmatter(&record.content).trim();
            md.push_str(&format!("### {}  \n", record.document.name));
            md.push_str(&format!("Path: {}\n\n", record.document.path));
            md.push_str(&format!(
                "{CONTENT_FENCE}markdown\n{body}\n{CONTENT_FENCE}\n\n"
            ));
        }
    }

    md
}

fn depth_description(depth: usize) -> String {
    match depth {
        0 => "The starting file itself.".to_owned(),
        1 => "Files directly linked to/from the starting file.".to_owned(),
        d => format!("Files {d} hops away."),
    }
}

fn section_title(depth: usize, start_name: &str) -> String {
    match depth {
        0 => format!("Starting file: {start_name}"),
        1 => "Directly linked files".to_owned(),
        d => format!("Files {d} hops away"),
    }
}
