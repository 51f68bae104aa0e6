// src/core/exclude.rs

/// Checks a vault path against exclusion patterns.
///
/// A pattern matches when it equals the path, or when it ends with `/` and
/// the path lies inside that folder. Patterns are trimmed and blank ones are
/// skipped. There is no wildcard support.
#[inline]
#[must_use]
pub fn is_excluded<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|pattern| {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            return false;
        }
        pattern == path || (pattern.ends_with('/') && path.starts_with(pattern))
    })
}
