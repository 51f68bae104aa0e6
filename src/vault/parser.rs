// src/vault/parser.rs
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::utils::strip_frontmatter;

const EXTERNAL_SCHEMES: [&str; 7] = [
    "http:", "https:", "mailto:", "tel:", "data:", "javascript:", "obsidian:",
];

/// Extracts internal link targets from a note, in order of appearance.
///
/// Wikilinks (`[[target|title]]`) and Markdown links (`[text](target)`) are
/// both returned as link paths with any `#heading` or `?query` suffix
/// removed. External URLs, pure anchors, images and `![[embeds]]` are
/// skipped. Links inside the frontmatter block or code are not seen.
pub(super) fn extract_link_targets(content: &str) -> Vec<String> {
    let body = strip_frontmatter(content);

    let mut options = Options::default();
    options.extension.wikilinks_title_after_pipe = true;

    let arena = Arena::new();
    let root = parse_document(&arena, body, &options);

    let mut targets = Vec::new();
    for node in root.descendants() {
        let target = match &node.data().value {
            NodeValue::Link(link) => normalize_markdown_target(&link.url),
            NodeValue::WikiLink(link) if !is_embed(node) => normalize_wikilink_target(&link.url),
            _ => None,
        };
        if let Some(target) = target {
            targets.push(target);
        }
    }
    targets
}

/// An embed is a wikilink written directly after `!`.
fn is_embed<'a>(node: &'a AstNode<'a>) -> bool {
    node.previous_sibling().is_some_and(|prev| {
        matches!(&prev.data().value, NodeValue::Text(text) if text.ends_with('!'))
    })
}

fn strip_suffixes(raw: &str) -> &str {
    let raw = raw.split_once('#').map_or(raw, |(left, _)| left);
    raw.split_once('?').map_or(raw, |(left, _)| left)
}

fn normalize_wikilink_target(raw: &str) -> Option<String> {
    let target = strip_suffixes(raw.trim()).trim().replace('\\', "/");
    (!target.is_empty()).then_some(target)
}

fn normalize_markdown_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unwrapped = trimmed
        .strip_prefix('<')
        .and_then(|inner| inner.split_once('>').map(|(target, _)| target))
        .unwrap_or(trimmed);

    let lower = unwrapped.to_lowercase();
    if lower.starts_with('#') || EXTERNAL_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return None;
    }

    let decoded = percent_decode(strip_suffixes(unwrapped));
    let target = decoded.trim().replace('\\', "/");
    (!target.is_empty()).then_some(target)
}

/// Decodes `%XX` escapes. Malformed escapes are kept as written.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while let Some(&byte) = bytes.get(i) {
        if byte == b'%' {
            let hex = bytes
                .get(i.saturating_add(1)..i.saturating_add(3))
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok());
            if let Some(value) = hex {
                decoded.push(value);
                i = i.saturating_add(3);
                continue;
            }
        }
        decoded.push(byte);
        i = i.saturating_add(1);
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
