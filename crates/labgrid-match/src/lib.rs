#![deny(unsafe_code)]

//! Approximate keyword matching tolerant of OCR noise, punctuation and
//! mixed Cyrillic/Latin spelling.

pub mod matcher;
pub mod score;

pub use matcher::{DEFAULT_THRESHOLD, FuzzyMatcher, MIN_FUZZY_LEN, find_best_match, is_fuzzy_match};
pub use score::{partial_ratio, similarity};
