//! Similarity scoring on a 0-100 scale.
//!
//! Uses the indel-normalized similarity from `rapidfuzz` as the base metric
//! and aligns the shorter string against every window of the longer one,
//! so "Patient Name:" scores 100 against "name".

use rapidfuzz::distance::indel;

use crate::matcher::MIN_FUZZY_LEN;

fn ratio(a: &[char], b: &[char]) -> f64 {
    indel::normalized_similarity(a.iter().copied(), b.iter().copied()) * 100.0
}

/// Best similarity between the shorter string and any aligned substring of
/// the longer one, including the partially overlapping windows at both
/// ends. Case-sensitive; callers lower-case first.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let m = short.len();
    let n = long.len();
    let mut best = 0.0_f64;

    for start in 0..=(n - m) {
        best = best.max(ratio(&short, &long[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    for len in 1..m {
        best = best
            .max(ratio(&short, &long[..len]))
            .max(ratio(&short, &long[n - len..]));
    }
    best
}

/// Case-insensitive score used by every matcher: exact equality is 100,
/// strings shorter than [`MIN_FUZZY_LEN`] only score on equality, anything
/// else is the partial ratio.
pub fn similarity(value: &str, target: &str) -> f64 {
    let value = value.trim().to_lowercase();
    let target = target.trim().to_lowercase();
    if value == target {
        return 100.0;
    }
    if value.chars().count() < MIN_FUZZY_LEN || target.chars().count() < MIN_FUZZY_LEN {
        return 0.0;
    }
    partial_ratio(&value, &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_scores_full() {
        assert_eq!(partial_ratio("patient name:", "name"), 100.0);
        assert_eq!(partial_ratio("name", "patient name:"), 100.0);
    }

    #[test]
    fn unrelated_words_score_low() {
        assert!(partial_ratio("результат", "тест") < 60.0);
        assert!(partial_ratio("hemoglobin", "unit") < 60.0);
    }

    #[test]
    fn empty_strings() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "abc"), 0.0);
    }

    #[test]
    fn similarity_ignores_case_and_padding() {
        assert_eq!(similarity("  РЕЗУЛЬТАТ ", "результат"), 100.0);
    }

    #[test]
    fn short_strings_need_equality() {
        assert_eq!(similarity("no", "nomenclature"), 0.0);
        assert_eq!(similarity("No", "no"), 100.0);
    }

    #[test]
    fn single_typo_stays_high() {
        // A substituted letter costs one deletion plus one insertion.
        assert!(partial_ratio("resu1t", "result") > 80.0);
        assert!(similarity("Рeзультат", "результат") > 85.0);
    }
}
