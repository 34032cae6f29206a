//! Text similarity scoring used by the fuzzy search primitives.
//!
//! Trigram similarity follows `pg_trgm`: lowercase, split into words of
//! alphanumeric code points, pad each word with two leading spaces and one
//! trailing space, collect the distinct 3-grams, and score two strings by
//! `|shared| / |union|`. Edit distance uses `strsim::levenshtein`, which
//! counts code points rather than bytes.

use std::collections::HashSet;

pub type Trigram = [char; 3];

/// Distinct padded trigrams of `text`.
#[must_use]
pub fn trigrams(text: &str) -> HashSet<Trigram> {
    let mut out = HashSet::new();
    let lowered = text.to_lowercase();
    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let padded: Vec<char> = [' ', ' ']
            .into_iter()
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            out.insert([window[0], window[1], window[2]]);
        }
    }
    out
}

/// Jaccard similarity of two trigram sets, in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn set_similarity(a: &HashSet<Trigram>, b: &HashSet<Trigram>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

/// Trigram similarity of two strings, in `[0, 1]`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    set_similarity(&trigrams(a), &trigrams(b))
}

/// Whether `a` and `b` are at most one insertion, deletion, or substitution
/// apart, ignoring case.
#[must_use]
pub fn within_one_edit(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.chars().count().abs_diff(b.chars().count()) > 1 {
        return false;
    }
    strsim::levenshtein(&a, &b) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_trigrams_are_padded() {
        let grams = trigrams("cat");
        let expected: HashSet<Trigram> = [
            [' ', ' ', 'c'],
            [' ', 'c', 'a'],
            ['c', 'a', 't'],
            ['a', 't', ' '],
        ]
        .into_iter()
        .collect();
        assert_eq!(grams, expected);
    }

    #[test]
    fn identical_strings_score_one() {
        assert!((similarity("오레오", "오레오") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn case_is_ignored() {
        assert!((similarity("Pocky", "pocky") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrelated_strings_score_zero() {
        assert!(similarity("abc", "xyz").abs() < f64::EPSILON);
        assert!(similarity("", "abc").abs() < f64::EPSILON);
    }

    #[test]
    fn typo_scores_between_bounds() {
        let score = similarity("초코파이", "초코퍄이");
        assert!(score > 0.0 && score < 1.0, "score was {score}");
    }

    #[test]
    fn punctuation_splits_words() {
        assert_eq!(trigrams("a-b"), trigrams("a b"));
    }

    #[test]
    fn one_edit_accepts_single_substitution_insertion_deletion() {
        assert!(within_one_edit("새우깡", "새우깡"));
        assert!(within_one_edit("새우깡", "새우광"));
        assert!(within_one_edit("새우깡", "새우깡s"));
        assert!(within_one_edit("Pocky", "pcky"));
    }

    #[test]
    fn one_edit_rejects_two_edits() {
        assert!(!within_one_edit("새우깡", "감자깡s"));
        assert!(!within_one_edit("abc", "abcde"));
    }
}
