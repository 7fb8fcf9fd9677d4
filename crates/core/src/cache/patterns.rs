//! Glob-style matching for cache keys. `*` matches any run of characters.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use bookshelf_core::cache::pattern_matches;
///
/// assert!(pattern_matches("page:book:*", "page:book:id=1"));
/// assert!(pattern_matches("page:*:id=1", "page:book:id=1"));
/// assert!(!pattern_matches("page:book:*", "page:home"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    // `split` always yields at least one item.
    let head = parts.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard at all.
        return rest.is_empty();
    };

    for segment in middle.iter().filter(|s| !s.is_empty()) {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(pattern_matches("page:home", "page:home"));
        assert!(!pattern_matches("page:home", "page:home:x"));
        assert!(!pattern_matches("page:home", "page:book"));
    }

    #[test]
    fn test_trailing_wildcard() {
        assert!(pattern_matches("page:book:*", "page:book:id=1"));
        assert!(pattern_matches("page:book:*", "page:book:"));
        assert!(!pattern_matches("page:book:*", "page:search:q=dune"));
    }

    #[test]
    fn test_leading_wildcard() {
        assert!(pattern_matches("*:id=1", "page:book:id=1"));
        assert!(!pattern_matches("*:id=1", "page:book:id=12"));
    }

    #[test]
    fn test_wildcards_in_middle() {
        assert!(pattern_matches("page:*:id=*", "page:book:id=3"));
        assert!(pattern_matches("a*b*c", "aXXbYYc"));
        assert!(!pattern_matches("a*b*c", "aXXcYYb"));
    }

    #[test]
    fn test_suffix_cannot_overlap_prefix() {
        assert!(!pattern_matches("ab*ba", "aba"));
        assert!(pattern_matches("ab*ba", "abba"));
    }

    #[test]
    fn test_wildcard_only_and_empty() {
        assert!(pattern_matches("*", ""));
        assert!(pattern_matches("**", "anything"));
        assert!(pattern_matches("", ""));
        assert!(!pattern_matches("", "x"));
    }
}
