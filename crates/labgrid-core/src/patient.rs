//! Patient metadata from the report header.
//!
//! The first table that carries a name or birth-date label is read as a
//! form: each label's value is the first populated cell to its right (one
//! empty separator column is skipped) or directly below it. Culture
//! findings printed in the same table become text-only records. Without
//! such a table, the first-page text is scanned line by line instead.

use labgrid_lexicon::{Lexicon, PatientLabels};
use labgrid_match::FuzzyMatcher;
use labgrid_model::{Grid, MICROBIOLOGY_CATEGORY, ParserOptions, PatientInfo, ResultRecord};
use labgrid_normalization::{
    DatePrecision, keyword_alternation, normalize_date, parse_height_cm, parse_report_date,
    parse_weight_kg,
};
use regex::Regex;
use tracing::{debug, trace};

use crate::document::LabReportParser;
use crate::error::ParserError;

/// Test name of a finding with no label cell to its left.
pub const FINDING_TEST_NAME: &str = "Culture";

/// Cells shorter than this are never patient labels.
const MIN_LABEL_CELL_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatientField {
    Name,
    Dob,
    ReportDate,
    Height,
    Weight,
}

/// Text of a label cell before any `:`, `,` or `(` ("Рост, см" reads
/// as "Рост").
fn label_head(cell: &str) -> &str {
    let head = cell.split([':', ',', '(']).next().unwrap_or(cell).trim();
    if head.is_empty() { cell.trim() } else { head }
}

struct LabelMatcher<'a> {
    labels: &'a PatientLabels,
    matcher: FuzzyMatcher,
    threshold: f64,
    max_len_diff: usize,
}

impl<'a> LabelMatcher<'a> {
    fn new(lexicon: &'a Lexicon, options: &ParserOptions) -> Self {
        Self {
            labels: &lexicon.patient,
            matcher: FuzzyMatcher::new(options.patient_threshold),
            threshold: options.patient_threshold,
            max_len_diff: options.patient_max_len_diff,
        }
    }

    fn is_label_of(&self, cell: &str, family: &[String]) -> bool {
        let head = label_head(cell);
        head.chars().count() >= MIN_LABEL_CELL_LEN
            && self
                .matcher
                .matches_label_family(head, family, self.threshold, self.max_len_diff)
    }

    fn classify(&self, cell: &str) -> Option<PatientField> {
        let labels = self.labels;
        if self.is_label_of(cell, &labels.name) {
            Some(PatientField::Name)
        } else if self.is_label_of(cell, &labels.dob) {
            Some(PatientField::Dob)
        } else if self.is_label_of(cell, &labels.report_date) {
            Some(PatientField::ReportDate)
        } else if self.is_label_of(cell, &labels.height) {
            Some(PatientField::Height)
        } else if self.is_label_of(cell, &labels.weight) {
            Some(PatientField::Weight)
        } else {
            None
        }
    }
}

/// True when some cell is a name or date-of-birth label.
pub fn is_patient_table(grid: &Grid, lexicon: &Lexicon, options: &ParserOptions) -> bool {
    let labels = LabelMatcher::new(lexicon, options);
    grid.non_empty_cells().any(|(_, _, text)| {
        labels.is_label_of(text, &lexicon.patient.name)
            || labels.is_label_of(text, &lexicon.patient.dob)
    })
}

/// Value of the label at `(row, column)`: right, two to the right, below.
pub fn adjacent_value(grid: &Grid, row: usize, column: usize) -> Option<&str> {
    [(row, column + 1), (row, column + 2), (row + 1, column)]
        .into_iter()
        .find_map(|(r, c)| grid.cell(r, c))
        .map(str::trim)
}

fn fill_field(info: &mut PatientInfo, field: PatientField, value: &str) {
    match field {
        PatientField::Name if info.name.is_none() => info.name = Some(value.to_string()),
        PatientField::Dob if info.dob.is_none() => info.dob = normalize_date(value),
        PatientField::ReportDate if info.report_date.is_none() => {
            info.report_date = normalize_date(value);
        }
        PatientField::Height if info.height_cm.is_none() => info.height_cm = parse_height_cm(value),
        PatientField::Weight if info.weight_kg.is_none() => info.weight_kg = parse_weight_kg(value),
        _ => {}
    }
}

/// Patient fields of a form-like table.
pub fn read_patient_table(
    grid: &Grid,
    lexicon: &Lexicon,
    options: &ParserOptions,
) -> PatientInfo {
    let labels = LabelMatcher::new(lexicon, options);
    let mut info = PatientInfo::default();
    for (row, column, text) in grid.non_empty_cells() {
        let Some(field) = labels.classify(text) else {
            continue;
        };
        if let Some(value) = adjacent_value(grid, row, column) {
            trace!(?field, value, "patient label");
            fill_field(&mut info, field, value);
        }
    }
    info
}

/// Free-text culture findings of a table as text-only records.
pub fn find_findings(
    grid: &Grid,
    lexicon: &Lexicon,
    options: &ParserOptions,
) -> Vec<ResultRecord> {
    let matcher = FuzzyMatcher::new(options.match_threshold);
    let labels = LabelMatcher::new(lexicon, options);
    grid.non_empty_cells()
        .filter(|(_, _, text)| labels.classify(text).is_none())
        .filter(|(_, _, text)| matcher.contains_any(text, &lexicon.finding_keywords))
        .map(|(row, column, text)| {
            let name = column
                .checked_sub(1)
                .and_then(|left| grid.cell(row, left))
                .map(|left| left.trim().trim_end_matches(':').trim())
                .filter(|left| !left.is_empty())
                .unwrap_or(FINDING_TEST_NAME);
            ResultRecord::draft(MICROBIOLOGY_CATEGORY, 1, name, text.trim())
        })
        .collect()
}

fn label_pattern(
    family: &'static str,
    keywords: &[String],
) -> Result<Option<Regex>, ParserError> {
    let Some(alternatives) = keyword_alternation(keywords) else {
        return Ok(None);
    };
    Regex::new(&format!(r"(?i)(?:^|[^\p{{L}}])(?:{alternatives})(?:[^\p{{L}}]|$)"))
        .map(Some)
        .map_err(|source| ParserError::LabelPattern { family, source })
}

/// Text of `line` before and after the first label of `pattern`; separators
/// are removed from the start of the second part.
fn split_at_label<'a>(pattern: Option<&Regex>, line: &'a str) -> Option<(&'a str, &'a str)> {
    let found = pattern?.find(line)?;
    let rest = line[found.end()..]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '.' | '-'));
    Some((&line[..found.start()], rest))
}

/// Rest of `line` after the first label of `pattern`, separators removed.
fn after_label<'a>(pattern: Option<&Regex>, line: &'a str) -> Option<&'a str> {
    split_at_label(pattern, line).map(|(_, rest)| rest)
}

/// A year printed on its own, as in "1980 г.р.". Full dates do not count.
fn bare_year(text: &str) -> Option<String> {
    parse_report_date(text)
        .filter(|date| date.precision() == DatePrecision::Year)
        .map(|date| date.to_string())
}

/// Line-based label scanner for reports without a patient table.
#[derive(Debug, Clone)]
pub struct PatientTextScanner {
    name: Option<Regex>,
    dob: Option<Regex>,
    report_date: Option<Regex>,
    height: Option<Regex>,
    weight: Option<Regex>,
    stop: Option<Regex>,
}

impl PatientTextScanner {
    pub fn new(labels: &PatientLabels) -> Result<Self, ParserError> {
        Ok(Self {
            name: label_pattern("name", &labels.name)?,
            dob: label_pattern("dob", &labels.dob)?,
            report_date: label_pattern("report_date", &labels.report_date)?,
            height: label_pattern("height", &labels.height)?,
            weight: label_pattern("weight", &labels.weight)?,
            stop: label_pattern("stop_words", &labels.stop_words)?,
        })
    }

    /// Text up to the next stop word.
    fn cut_at_stop<'a>(&self, rest: &'a str) -> &'a str {
        let stop = self
            .stop
            .as_ref()
            .and_then(|re| re.find(rest))
            .map_or(rest.len(), |m| m.start());
        &rest[..stop]
    }

    /// A name runs to the next stop word, digit or end of line.
    fn cut_name<'a>(&self, rest: &'a str) -> &'a str {
        let rest = self.cut_at_stop(rest);
        let digit = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        rest[..digit]
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':'))
    }

    pub fn scan(&self, text: &str) -> PatientInfo {
        let mut info = PatientInfo::default();
        for line in text.lines() {
            if info.name.is_none()
                && let Some(rest) = after_label(self.name.as_ref(), line)
            {
                let name = self.cut_name(rest);
                if !name.is_empty() {
                    info.name = Some(name.to_string());
                }
            }
            let dob_label = split_at_label(self.dob.as_ref(), line);
            if info.dob.is_none()
                && let Some((before, rest)) = dob_label
            {
                // "1980 г.р." prints the year before its label.
                info.dob = normalize_date(self.cut_at_stop(rest)).or_else(|| bare_year(before));
            }
            if info.report_date.is_none()
                && dob_label.is_none()
                && let Some(rest) = after_label(self.report_date.as_ref(), line)
            {
                info.report_date = normalize_date(rest);
            }
            if info.height_cm.is_none()
                && let Some(rest) = after_label(self.height.as_ref(), line)
            {
                info.height_cm = parse_height_cm(rest);
            }
            if info.weight_kg.is_none()
                && let Some(rest) = after_label(self.weight.as_ref(), line)
            {
                info.weight_kg = parse_weight_kg(rest);
            }
        }
        info
    }
}

/// Patient info and findings recovered from a document header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientExtraction {
    pub info: PatientInfo,
    pub findings: Vec<ResultRecord>,
    /// True when no patient table existed and the text scan was used.
    pub from_text: bool,
}

impl LabReportParser {
    /// Reads the first patient table among `tables`, or scans the first
    /// `fallback_scan_chars` characters of `fallback_text` when there is none.
    pub fn extract_patient_info<'a>(
        &self,
        tables: impl IntoIterator<Item = &'a Grid>,
        fallback_text: &str,
    ) -> PatientExtraction {
        let lexicon = self.lexicon();
        let options = self.options();
        if let Some(grid) = tables
            .into_iter()
            .find(|grid| is_patient_table(grid, lexicon, options))
        {
            let info = read_patient_table(grid, lexicon, options);
            let findings = find_findings(grid, lexicon, options);
            debug!(findings = findings.len(), "patient table found");
            return PatientExtraction {
                info,
                findings,
                from_text: false,
            };
        }

        let bounded: String = fallback_text.chars().take(options.fallback_scan_chars).collect();
        let info = self.patient_scanner().scan(&bounded);
        debug!(found = !info.is_empty(), "no patient table, scanned first-page text");
        PatientExtraction {
            info,
            findings: Vec::new(),
            from_text: true,
        }
    }
}
