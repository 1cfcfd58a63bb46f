//! Threshold-based keyword matching.

use crate::score::similarity;

/// Threshold used when none is given.
pub const DEFAULT_THRESHOLD: f64 = 85.0;

/// Strings shorter than this (in characters) only match exactly, so that
/// "no" cannot match "nomenclature" through partial overlap.
pub const MIN_FUZZY_LEN: usize = 3;

/// True when `value` and `target` are equal ignoring case, or when both are
/// long enough and their partial ratio reaches `threshold`.
pub fn is_fuzzy_match(value: &str, target: &str, threshold: f64) -> bool {
    if value.trim().is_empty() || target.trim().is_empty() {
        return false;
    }
    similarity(value, target) >= threshold
}

/// Highest-scoring candidate at or above `threshold`. Ties keep the first.
pub fn find_best_match<'a, S: AsRef<str>>(
    value: &str,
    candidates: &'a [S],
    threshold: f64,
) -> Option<&'a str> {
    if value.trim().is_empty() {
        return None;
    }
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = similarity(value, candidate);
        if score >= threshold && best.is_none_or(|(_, current)| score > current) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Matcher carrying a default threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn is_match(&self, value: &str, target: &str) -> bool {
        is_fuzzy_match(value, target, self.threshold)
    }

    /// Fuzzy-contains: true when any keyword matches `text`.
    pub fn contains_any<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> bool {
        self.contains_any_at(text, keywords, self.threshold)
    }

    pub fn contains_any_at<S: AsRef<str>>(
        &self,
        text: &str,
        keywords: &[S],
        threshold: f64,
    ) -> bool {
        keywords
            .iter()
            .any(|keyword| is_fuzzy_match(text, keyword.as_ref(), threshold))
    }

    /// Label matching for form-like tables: the cell must match the keyword
    /// and differ from it in length by at most `max_len_diff` characters.
    /// This rejects long free-text cells that merely contain the keyword.
    pub fn matches_label(
        &self,
        cell: &str,
        keyword: &str,
        threshold: f64,
        max_len_diff: usize,
    ) -> bool {
        let cell_len = cell.trim().chars().count();
        let keyword_len = keyword.trim().chars().count();
        cell_len.abs_diff(keyword_len) <= max_len_diff && is_fuzzy_match(cell, keyword, threshold)
    }

    /// True when `cell` is a label of any keyword in `family`.
    pub fn matches_label_family<S: AsRef<str>>(
        &self,
        cell: &str,
        family: &[S],
        threshold: f64,
        max_len_diff: usize,
    ) -> bool {
        family
            .iter()
            .any(|keyword| self.matches_label(cell, keyword.as_ref(), threshold, max_len_diff))
    }
}
