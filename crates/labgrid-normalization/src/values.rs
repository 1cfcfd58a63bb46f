//! Coercion of raw result strings into numbers.

use std::sync::LazyLock;

use labgrid_lexicon::TimeKeywords;
use labgrid_model::ResultRecord;
use regex::Regex;
use tracing::trace;

use crate::error::NormalizationError;
use crate::patterns::keyword_alternation;

/// Unit assigned to every value read as a duration.
pub const SECONDS_UNIT: &str = "Seconds";

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("Invalid numeric regex"));

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn keyword_pattern(
    family: &'static str,
    keywords: &[String],
) -> Result<Option<Regex>, NormalizationError> {
    let Some(alternatives) = keyword_alternation(keywords) else {
        return Ok(None);
    };
    let pattern = format!(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:{alternatives})\b");
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| NormalizationError::TimePattern { family, source })
}

/// Hour, minute and second patterns compiled from a lexicon.
#[derive(Debug, Clone)]
pub struct TimePatterns {
    hours: Option<Regex>,
    minutes: Option<Regex>,
    seconds: Option<Regex>,
}

impl TimePatterns {
    pub fn new(keywords: &TimeKeywords) -> Result<Self, NormalizationError> {
        Ok(Self {
            hours: keyword_pattern("hours", &keywords.hours)?,
            minutes: keyword_pattern("minutes", &keywords.minutes)?,
            seconds: keyword_pattern("seconds", &keywords.seconds)?,
        })
    }

    /// Total duration in seconds, or `None` when no time unit occurs.
    /// Each unit contributes its first occurrence.
    pub fn total_seconds(&self, text: &str) -> Option<f64> {
        let parts = [
            (&self.hours, 3600.0),
            (&self.minutes, 60.0),
            (&self.seconds, 1.0),
        ];
        let mut total = 0.0;
        let mut matched = false;
        for (pattern, factor) in parts {
            let Some(pattern) = pattern else { continue };
            let Some(amount) = pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
            else {
                continue;
            };
            total += amount * factor;
            matched = true;
        }
        matched.then_some(total)
    }
}

/// Parses a result string as a plain number after removing inequality
/// markers and whitespace and reading a decimal comma as a point.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '>' | '<' | '≤' | '≥') && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if !NUMERIC.is_match(&cleaned) {
        return None;
    }
    cleaned.parse().ok()
}

/// Derives `value` (and the unit of durations) from `text_value`.
///
/// Durations take precedence over plain numbers. Values that are neither
/// stay `None` and keep their text.
pub fn normalize_result_values(
    mut rows: Vec<ResultRecord>,
    time: &TimePatterns,
) -> Vec<ResultRecord> {
    for row in &mut rows {
        let text = row.text_value.trim();
        if text.is_empty() {
            row.value = None;
            continue;
        }
        if let Some(seconds) = time.total_seconds(text) {
            row.value = Some(round2(seconds));
            row.unit = Some(SECONDS_UNIT.to_string());
            continue;
        }
        row.value = parse_numeric(text);
        if row.value.is_none() {
            trace!(test = %row.test_name, text, "non-numeric result");
        }
    }
    rows
}
