// src/core/words.rs
use crate::utils::strip_frontmatter;

/// Share of CJK characters above which text is counted per character.
const CJK_RATIO_NUMERATOR: usize = 3;
const CJK_RATIO_DENOMINATOR: usize = 20;

/// Hiragana, Katakana, CJK ideographs (incl. extension A), compatibility
/// ideographs and halfwidth Katakana.
const fn is_cjk(ch: char) -> bool {
    matches!(
        ch,
        '\u{3040}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ff66}'..='\u{ff9f}'
    )
}

/// Counts words in a note body.
///
/// When `has_metadata_block` is set, a leading frontmatter block is skipped.
/// Text where more than 15% of the characters are CJK is counted per
/// non-whitespace character, since those scripts do not separate words with
/// spaces. Everything else is counted per whitespace-separated token.
///
/// # Arguments
///
/// * `content` - The raw note content
/// * `has_metadata_block` - Whether a leading frontmatter block should be ignored
///
/// # Returns
///
/// The number of words, `0` for empty content
#[inline]
#[must_use]
pub fn count_words(content: &str, has_metadata_block: bool) -> usize {
    if content.is_empty() {
        return 0;
    }

    let body = if has_metadata_block {
        strip_frontmatter(content)
    } else {
        content
    }
    .trim();

    let total_chars = body.chars().count();
    if total_chars == 0 {
        return 0;
    }

    let cjk_chars = body.chars().filter(|ch| is_cjk(*ch)).count();
    if cjk_chars.saturating_mul(CJK_RATIO_DENOMINATOR)
        > total_chars.saturating_mul(CJK_RATIO_NUMERATOR)
    {
        body.chars().filter(|ch| !ch.is_whitespace()).count()
    } else {
        body.split_whitespace().count()
    }
}
