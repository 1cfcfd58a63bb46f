//! Configuration options for document parsing.

use serde::{Deserialize, Serialize};

/// Category used before any table label has been resolved.
pub const DEFAULT_CATEGORY: &str = "Unknown Category";

/// Thresholds and switches for the interpretation heuristics.
///
/// Similarity thresholds are on the 0-100 partial-ratio scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// General fuzzy threshold: header-row detection, ghost trimming,
    /// label keywords, culture findings.
    pub match_threshold: f64,

    /// Threshold for binding header cells to column roles.
    pub header_threshold: f64,

    /// Threshold for patient label cells.
    pub patient_threshold: f64,

    /// Maximum length difference between a patient label cell and its
    /// keyword. Rejects long cells that merely contain the keyword.
    pub patient_max_len_diff: usize,

    /// Height of the band above a table searched for its label.
    pub header_window: f64,

    /// Number of characters of first-page text scanned when no patient
    /// table exists.
    pub fallback_scan_chars: usize,

    /// Strip group prefixes and ordinals from antibiotic test names.
    pub clean_antibiotic_names: bool,

    /// Category in effect until the first label is found.
    pub default_category: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            match_threshold: 85.0,
            header_threshold: 88.0,
            patient_threshold: 92.0,
            patient_max_len_diff: 3,
            header_window: 100.0,
            fallback_scan_chars: 3000,
            clean_antibiotic_names: true,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Higher thresholds: fewer but surer matches.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            match_threshold: 90.0,
            header_threshold: 92.0,
            patient_threshold: 95.0,
            ..Self::default()
        }
    }

    /// Lower thresholds for noisy scans.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            match_threshold: 80.0,
            header_threshold: 85.0,
            patient_threshold: 88.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_header_window(mut self, window: f64) -> Self {
        self.header_window = window;
        self
    }

    #[must_use]
    pub fn with_antibiotic_cleanup(mut self, enable: bool) -> Self {
        self.clean_antibiotic_names = enable;
        self
    }

    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }
}
