//! Bundle name pattern matching.
//!
//! Patterns are plain strings with two special characters:
//! - `*` matches one or more of `[a-z0-9_-]`
//! - `|` separates alternatives, optionally grouped: `post.(save|delete)`
//!
//! Matching is anchored and case-insensitive.

use std::cell::RefCell;
use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

/// Matches bundle names against domain patterns.
///
/// Compiled patterns are cached per instance.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    compiled: RefCell<HashMap<String, Option<Regex>>>,
}

impl Matcher {
    /// Create a new matcher with an empty pattern cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a string contains pattern syntax (`*` or `|`).
    pub fn is_pattern(string: &str) -> bool {
        string.contains('*') || string.contains('|')
    }

    /// Check if `string` matches `pattern`.
    ///
    /// Exact matches always succeed; a non-pattern string never matches
    /// anything but itself.
    pub fn matches(&self, string: &str, pattern: &str) -> bool {
        if string == pattern {
            return true;
        }
        if !Self::is_pattern(pattern) {
            return false;
        }

        let mut compiled = self.compiled.borrow_mut();
        let regex = compiled.entry(pattern.to_string()).or_insert_with(|| compile(pattern));

        regex.as_ref().is_some_and(|re| re.is_match(string))
    }
}

/// Translate a pattern into an anchored, case-insensitive regex.
fn compile(pattern: &str) -> Option<Regex> {
    let mut body = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars() {
        match c {
            '*' => body.push_str(r"[a-z0-9_\-]+"),
            '.' => body.push_str(r"\."),
            other => body.push(other),
        }
    }

    match RegexBuilder::new(&format!("^(?:{body})$")).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern = pattern, error = %e, "Invalid domain pattern");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let matcher = Matcher::new();
        assert!(matcher.matches("spiral-views", "spiral-views"));
        assert!(matcher.matches("post.save", "post.save"));
    }

    #[test]
    fn test_non_pattern_mismatch() {
        let matcher = Matcher::new();
        assert!(!matcher.matches("spiral-views", "spiral"));
        assert!(!matcher.matches("post-save", "post.save"));
    }

    #[test]
    fn test_wildcard() {
        let matcher = Matcher::new();
        assert!(matcher.matches("spiral-views", "spiral-*"));
        assert!(matcher.matches("SPIRAL-Views", "spiral-*"));
        assert!(!matcher.matches("vendor-views", "spiral-*"));
        assert!(!matcher.matches("spiral-", "spiral-*"));
        assert!(matcher.matches("anything", "*"));
    }

    #[test]
    fn test_wildcard_does_not_cross_dots() {
        let matcher = Matcher::new();
        assert!(matcher.matches("post.edit", "post.*"));
        assert!(!matcher.matches("post.edit.more", "post.*"));
        assert!(!matcher.matches("postXedit", "post.*"));
    }

    #[test]
    fn test_alternation() {
        let matcher = Matcher::new();
        assert!(matcher.matches("post.save", "post.(save|delete)"));
        assert!(matcher.matches("post.delete", "post.(save|delete)"));
        assert!(!matcher.matches("post.view", "post.(save|delete)"));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let matcher = Matcher::new();
        assert!(!matcher.matches("post", "post(|"));
    }

    #[test]
    fn test_is_pattern() {
        assert!(Matcher::is_pattern("spiral-*"));
        assert!(Matcher::is_pattern("a|b"));
        assert!(!Matcher::is_pattern("plain"));
    }
}
