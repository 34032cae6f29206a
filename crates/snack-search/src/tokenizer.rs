//! Query normalization and whitespace tokenization.
//!
//! Lengths are always counted in Unicode code points, never bytes, so a
//! Hangul syllable counts as one character.

/// A normalized query and its tokens, in query order with duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub text: String,
    pub tokens: Vec<String>,
}

impl NormalizedQuery {
    /// Normalize `raw` and split it into tokens.
    #[must_use]
    pub fn parse(raw: &str, max_chars: usize) -> Self {
        let text = normalize(raw, max_chars);
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// No tokens: serve a plain newest-first listing instead of searching.
    #[must_use]
    pub fn is_browse(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn has_whitespace(&self) -> bool {
        self.text.chars().any(char::is_whitespace)
    }
}

/// Trim, collapse whitespace runs to a single space, cap at `max_chars`
/// code points, then trim whatever trailing space the cut exposed.
#[must_use]
pub fn normalize(raw: &str, max_chars: usize) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.trim().to_string()
}

#[must_use]
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}

#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("   ", "")]
    #[case("  초코   칩 ", "초코 칩")]
    #[case("a\t\nb", "a b")]
    #[case("오레오쿠키", "오레오쿠키")]
    fn normalize_trims_and_collapses(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw, 200), expected);
    }

    #[test]
    fn normalize_truncates_by_code_point() {
        let raw = "가".repeat(250);
        let out = normalize(&raw, 200);
        assert_eq!(char_len(&out), 200);
        assert_eq!(out.len(), 600);
    }

    #[test]
    fn truncation_never_leaves_trailing_space() {
        let out = normalize("abc def", 4);
        assert_eq!(out, "abc");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("  새우깡   매운맛  ", 200);
        assert_eq!(normalize(&once, 200), once);
    }

    #[test]
    fn tokens_keep_order_and_duplicates() {
        let q = NormalizedQuery::parse("초코 쿠키 초코", 200);
        assert_eq!(q.tokens, vec!["초코", "쿠키", "초코"]);
        assert!(q.has_whitespace());
        assert!(!q.is_browse());
    }

    #[test]
    fn blank_query_is_browse() {
        let q = NormalizedQuery::parse(" \t ", 200);
        assert!(q.is_browse());
        assert_eq!(q.text, "");
    }
}
