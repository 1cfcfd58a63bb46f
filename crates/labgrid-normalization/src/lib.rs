//! Value normalization for interpreted lab results.
//!
//! Three record stages run in a fixed order:
//! [`expand_composite_rows`], [`infer_missing_units`] and
//! [`normalize_result_values`]. Each stage is idempotent and tolerates
//! missing norms, units and empty text. Patient measures and dates are
//! parsed here as well, since they share the same textual conventions.

pub mod composite;
pub mod dates;
pub mod error;
pub mod measures;
pub mod names;
pub mod patterns;
pub mod units;
pub mod values;

use labgrid_lexicon::{Lexicon, UnitSuffix};
use labgrid_model::ResultRecord;

pub use composite::{expand_composite_rows, is_row_expandable};
pub use dates::{DatePrecision, ReportDate, normalize_date, parse_report_date};
pub use error::NormalizationError;
pub use measures::{parse_height_cm, parse_weight_kg};
pub use names::clean_antibiotic_name;
pub use patterns::keyword_alternation;
pub use units::{detect_unit, infer_missing_units};
pub use values::{SECONDS_UNIT, TimePatterns, normalize_result_values, parse_numeric};

/// The record stages bound to one lexicon.
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    unit_suffixes: Vec<UnitSuffix>,
    time: TimePatterns,
}

impl ValueNormalizer {
    pub fn new(lexicon: &Lexicon) -> Result<Self, NormalizationError> {
        Ok(Self {
            unit_suffixes: lexicon.unit_suffixes.clone(),
            time: TimePatterns::new(&lexicon.time_keywords)?,
        })
    }

    pub fn detect_unit(&self, text: Option<&str>) -> Option<&str> {
        detect_unit(text, &self.unit_suffixes)
    }

    pub fn expand_composite_rows(&self, rows: Vec<ResultRecord>) -> Vec<ResultRecord> {
        expand_composite_rows(rows, &self.unit_suffixes)
    }

    pub fn infer_missing_units(&self, rows: Vec<ResultRecord>) -> Vec<ResultRecord> {
        infer_missing_units(rows, &self.unit_suffixes)
    }

    pub fn normalize_result_values(&self, rows: Vec<ResultRecord>) -> Vec<ResultRecord> {
        normalize_result_values(rows, &self.time)
    }

    /// All three stages in order.
    pub fn normalize(&self, rows: Vec<ResultRecord>) -> Vec<ResultRecord> {
        let rows = self.expand_composite_rows(rows);
        let rows = self.infer_missing_units(rows);
        self.normalize_result_values(rows)
    }
}
