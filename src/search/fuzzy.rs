//! Approximate string matching
//!
//! Three tiers, best score wins: case-insensitive exact substring,
//! Smith-Waterman-style subsequence scoring via the nucleo-matcher crate
//! (used in the Helix editor), and bounded edit distance over words to
//! tolerate substitution typos the subsequence matcher cannot see.
//!
//! Callers are expected to hand in text already canonicalized by
//! [`super::parser::normalize`]; the index does this once at build time.

use nucleo_matcher::{Config, Matcher, Utf32String};
use unicode_segmentation::UnicodeSegmentation;

/// Score awarded for an exact substring hit
const EXACT_SCORE: f64 = 1.0;
/// Ceiling for subsequence matches, always below an exact hit
const SUBSEQUENCE_CEILING: f64 = 0.9;
/// Ceiling for edit-distance word matches
const EDIT_DISTANCE_CEILING: f64 = 0.8;

/// Fuzzy matcher over pre-normalized text
pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher with default configuration
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Best approximate-match score of `needle` against `haystack`.
    ///
    /// Returns a score in (0, 1], or `None` when no tier matches. The
    /// threshold is the tiers themselves: a field with no exact, subsequence
    /// or in-budget edit-distance hit contributes nothing.
    pub fn score(&mut self, haystack: &str, needle: &str) -> Option<f64> {
        if needle.is_empty() || haystack.is_empty() {
            return None;
        }

        if haystack.contains(needle) {
            return Some(EXACT_SCORE);
        }

        let mut best: Option<f64> = None;

        if let Some(ratio) = self.subsequence_ratio(haystack, needle) {
            best = Some(SUBSEQUENCE_CEILING * ratio);
        }

        if let Some(word_score) = Self::word_edit_score(haystack, needle) {
            let scaled = EDIT_DISTANCE_CEILING * word_score;
            best = Some(best.map_or(scaled, |b| b.max(scaled)));
        }

        best
    }

    /// Subsequence score from nucleo, normalized by the needle's self-match
    /// score (the maximum nucleo can award for this needle). Gap penalties
    /// discount scattered alignments, so looser matches land lower.
    fn subsequence_ratio(&mut self, haystack: &str, needle: &str) -> Option<f64> {
        let haystack = Utf32String::from(haystack);
        let needle = Utf32String::from(needle);

        let score = self
            .matcher
            .fuzzy_match(haystack.slice(..), needle.slice(..))?;
        let ceiling = self
            .matcher
            .fuzzy_match(needle.slice(..), needle.slice(..))
            .unwrap_or(score)
            .max(1);

        Some((f64::from(score) / f64::from(ceiling)).min(1.0))
    }

    /// Best bounded-edit-distance match of `needle` against any single word
    /// of the haystack. The edit budget follows the needle length: up to 2
    /// chars allows no edits, up to 5 allows one, longer terms allow two.
    fn word_edit_score(haystack: &str, needle: &str) -> Option<f64> {
        let needle_len = needle.chars().count();
        let budget = match needle_len {
            0..=2 => 0,
            3..=5 => 1,
            _ => 2,
        };
        if budget == 0 {
            return None;
        }

        let mut best: Option<f64> = None;
        for word in haystack.unicode_words() {
            let distance = levenshtein(word, needle);
            if distance <= budget {
                let score = 1.0 - distance as f64 / needle_len as f64;
                best = Some(best.map_or(score, |b: f64| b.max(score)));
            }
        }
        best
    }
}

/// Two-row Levenshtein distance over chars
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
