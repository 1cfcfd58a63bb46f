//! Structured output records.

use serde::{Deserialize, Serialize};

/// Category assigned to free-text culture findings found in patient tables.
pub const MICROBIOLOGY_CATEGORY: &str = "Microbiology";

/// One interpreted test result.
///
/// `text_value` always keeps the display string from the report; `value` is
/// only set when that string is machine-numeric (or a recognized duration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub category: String,
    /// 1-indexed page number.
    pub page: usize,
    pub test_name: String,
    pub value: Option<f64>,
    pub text_value: String,
    pub norm: Option<String>,
    pub unit: Option<String>,
}

impl ResultRecord {
    /// A record whose numeric value has not been derived yet.
    pub fn draft(
        category: impl Into<String>,
        page: usize,
        test_name: impl Into<String>,
        text_value: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            page,
            test_name: test_name.into(),
            value: None,
            text_value: text_value.into(),
            norm: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_norm(mut self, norm: Option<String>) -> Self {
        self.norm = norm;
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: Option<String>) -> Self {
        self.unit = unit;
        self
    }

    /// True when the record carries only text (no numeric value).
    pub fn is_text_only(&self) -> bool {
        self.value.is_none()
    }
}

/// Patient metadata recovered from the report header.
///
/// Dates are `DD.MM.YYYY`, or `00.00.YYYY` when only the year is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub report_date: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl PatientInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dob.is_none()
            && self.report_date.is_none()
            && self.height_cm.is_none()
            && self.weight_kg.is_none()
    }
}

/// Document-level facts that are not tied to a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Printer timestamp (`DD.MM.YYYY HH:MM`), first seen in the document.
    pub printed_at: Option<String>,
}
