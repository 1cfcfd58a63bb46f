//! The document state machine.
//!
//! Tables are interpreted in reading order while three pieces of state
//! carry over between tables and pages: the current category label, the
//! column map of the last header row, and the active hierarchy group. A new
//! label resets the other two. All state lives in a [`DocumentState`]
//! created per document, so one parser can serve many documents at once.

use std::collections::VecDeque;
use std::sync::Arc;

use labgrid_lexicon::Lexicon;
use labgrid_match::FuzzyMatcher;
use labgrid_model::{
    ColumnRole, ColumnRoleMap, Document, DocumentMetadata, FlowBlock, FlowDocument, Grid, Page,
    ParserOptions, PatientInfo, ResultRecord,
};
use labgrid_normalization::{ValueNormalizer, clean_antibiotic_name};
use labgrid_structure::{
    Demultiplexed, clean_and_normalize, demultiplex, flatten_hierarchical_table,
    is_table_hierarchical,
};
use serde::Serialize;
use tracing::{debug, debug_span, info, info_span};

use crate::columns::{HeaderMapping, find_header_row, map_header_indices};
use crate::error::ParserError;
use crate::header::{best_label, find_label_above};
use crate::interpreter::TableInterpretation;
use crate::metadata::find_printed_at;
use crate::patient::{PatientTextScanner, is_patient_table};

/// Paragraphs considered as the label of the next table in flow documents.
const FLOW_LABEL_CANDIDATES: usize = 3;

/// Page number given to every record of a flow document.
const FLOW_PAGE: usize = 1;

/// Where a table comes from: a paged document with geometry, or a flow
/// document read block by block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Paged,
    Flow,
}

/// State carried across tables and pages of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub category: String,
    pub column_map: Option<ColumnRoleMap>,
    pub parent_category: Option<String>,
}

impl DocumentState {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            column_map: None,
            parent_category: None,
        }
    }

    /// A new label starts a new section: new category, no column map, no
    /// hierarchy group.
    pub fn apply_label(&mut self, label: impl Into<String>) {
        self.category = label.into();
        self.column_map = None;
        self.parent_category = None;
    }
}

/// Counters of one parse. Degradations are counted here instead of being
/// reported as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub pages: usize,
    pub tables: usize,
    /// Blank and patient tables.
    pub skipped_tables: usize,
    /// Side-by-side tables split in two.
    pub split_tables: usize,
    pub labels: usize,
    pub positional_fallbacks: usize,
    pub dropped_rows: usize,
    pub unparsable_values: usize,
    /// No patient table was found and the text scan was used.
    pub patient_from_text: bool,
}

/// Everything recovered from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub patient: PatientInfo,
    pub results: Vec<ResultRecord>,
    pub metadata: DocumentMetadata,
    pub stats: ParseStats,
}

impl ParseOutcome {
    pub fn into_parts(self) -> (PatientInfo, Vec<ResultRecord>) {
        (self.patient, self.results)
    }
}

fn is_blank(grid: &Grid) -> bool {
    grid.non_empty_cells().next().is_none()
}

/// Interprets lab-report documents. Immutable once built and shareable
/// across threads.
#[derive(Debug, Clone)]
pub struct LabReportParser {
    lexicon: Arc<Lexicon>,
    options: ParserOptions,
    normalizer: ValueNormalizer,
    patient_scanner: PatientTextScanner,
}

impl LabReportParser {
    pub fn new(lexicon: Arc<Lexicon>, options: ParserOptions) -> Result<Self, ParserError> {
        lexicon.validate()?;
        let normalizer = ValueNormalizer::new(&lexicon)?;
        let patient_scanner = PatientTextScanner::new(&lexicon.patient)?;
        Ok(Self {
            lexicon,
            options,
            normalizer,
            patient_scanner,
        })
    }

    /// Built-in lexicon and default options.
    pub fn with_defaults() -> Result<Self, ParserError> {
        Self::new(Arc::new(Lexicon::default()), ParserOptions::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub(crate) fn normalizer(&self) -> &ValueNormalizer {
        &self.normalizer
    }

    pub(crate) fn patient_scanner(&self) -> &PatientTextScanner {
        &self.patient_scanner
    }

    /// Fresh state for a new document.
    pub fn new_state(&self) -> DocumentState {
        DocumentState::new(self.options.default_category.clone())
    }

    pub fn parse_document(&self, document: &Document) -> ParseOutcome {
        let span = info_span!("document", pages = document.pages.len());
        let _guard = span.enter();

        let mut state = self.new_state();
        let mut stats = ParseStats {
            pages: document.pages.len(),
            ..ParseStats::default()
        };
        let mut results = Vec::new();
        let mut metadata = DocumentMetadata::default();

        let patient = match document.pages.first() {
            Some(first) => {
                let tables = first.tables_top_to_bottom();
                let extraction =
                    self.extract_patient_info(tables.iter().map(|t| &t.grid), &first.raw_text());
                stats.patient_from_text = extraction.from_text;
                results.extend(extraction.findings);
                extraction.info
            }
            None => PatientInfo::default(),
        };

        for (index, page) in document.pages.iter().enumerate() {
            if metadata.printed_at.is_none() {
                metadata.printed_at =
                    find_printed_at(page.text_lines.iter().map(|line| line.text.as_str()));
            }
            results.extend(self.process_page(page, index + 1, &mut state, &mut stats));
        }

        info!(
            records = results.len(),
            tables = stats.tables,
            dropped_rows = stats.dropped_rows,
            "document parsed"
        );
        ParseOutcome {
            patient,
            results,
            metadata,
            stats,
        }
    }

    /// Interprets the tables of one page (1-indexed), top to bottom.
    pub fn process_page(
        &self,
        page: &Page,
        page_number: usize,
        state: &mut DocumentState,
        stats: &mut ParseStats,
    ) -> Vec<ResultRecord> {
        let _span = debug_span!("page", page = page_number).entered();
        let mut results = Vec::new();

        for table in page.tables_top_to_bottom() {
            stats.tables += 1;
            if let Some(bbox) = &table.bbox
                && let Some(label) = find_label_above(page, bbox, &self.lexicon, &self.options)
            {
                debug!(label = %label, "table label");
                stats.labels += 1;
                state.apply_label(label);
            }
            if is_blank(&table.grid)
                || is_patient_table(&table.grid, &self.lexicon, &self.options)
            {
                stats.skipped_tables += 1;
                continue;
            }
            results.extend(self.process_table(
                &table.grid,
                page_number,
                Layout::Paged,
                state,
                stats,
            ));
        }
        results
    }

    /// Interprets a document without page geometry. Each table is labelled
    /// by the best of the last few paragraphs before it; a used label is
    /// not offered to later tables.
    pub fn parse_flow(&self, document: &FlowDocument) -> ParseOutcome {
        let span = info_span!("flow_document", blocks = document.blocks.len());
        let _guard = span.enter();

        let mut state = self.new_state();
        let mut stats = ParseStats {
            pages: 1,
            ..ParseStats::default()
        };

        let extraction = self.extract_patient_info(document.tables(), &document.paragraph_text());
        stats.patient_from_text = extraction.from_text;
        let mut results = extraction.findings;

        let metadata = DocumentMetadata {
            printed_at: find_printed_at(document.blocks.iter().filter_map(|block| match block {
                FlowBlock::Paragraph(text) => Some(text.as_str()),
                FlowBlock::Table(_) => None,
            })),
        };

        let mut recent: VecDeque<&str> = VecDeque::with_capacity(FLOW_LABEL_CANDIDATES + 1);
        for block in &document.blocks {
            match block {
                FlowBlock::Paragraph(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    recent.push_back(text);
                    if recent.len() > FLOW_LABEL_CANDIDATES {
                        recent.pop_front();
                    }
                }
                FlowBlock::Table(grid) => {
                    stats.tables += 1;
                    if is_blank(grid) || is_patient_table(grid, &self.lexicon, &self.options) {
                        stats.skipped_tables += 1;
                        continue;
                    }
                    if let Some(label) = best_label(
                        recent.iter().copied(),
                        &self.lexicon,
                        self.options.match_threshold,
                    ) {
                        debug!(label, "table label");
                        stats.labels += 1;
                        state.apply_label(label);
                        recent.clear();
                    }
                    results.extend(self.process_table(
                        grid,
                        FLOW_PAGE,
                        Layout::Flow,
                        &mut state,
                        &mut stats,
                    ));
                }
            }
        }

        info!(records = results.len(), tables = stats.tables, "flow document parsed");
        ParseOutcome {
            patient: extraction.info,
            results,
            metadata,
            stats,
        }
    }

    /// Structure, interpretation and post-processing of one result table.
    /// Only flow tables are considered for side-by-side splitting. The
    /// halves of a split table are interpreted on their own and leave the
    /// column map and hierarchy group untouched.
    fn process_table(
        &self,
        grid: &Grid,
        page: usize,
        layout: Layout,
        state: &mut DocumentState,
        stats: &mut ParseStats,
    ) -> Vec<ResultRecord> {
        let grid = clean_and_normalize(
            grid,
            self.lexicon.role_keywords(ColumnRole::Result),
            self.options.match_threshold,
        );

        let split = match layout {
            Layout::Flow if !self.has_right_value_columns(&grid, state.column_map) => {
                demultiplex(grid)
            }
            _ => Demultiplexed::Single(grid),
        };
        match split {
            Demultiplexed::Single(grid) => {
                let grid = if is_table_hierarchical(&grid) || state.parent_category.is_some() {
                    let (flat, parent) =
                        flatten_hierarchical_table(&grid, state.parent_category.as_deref());
                    state.parent_category = parent;
                    flat
                } else {
                    state.parent_category = None;
                    grid
                };
                let table = self.process_table_data(&grid, &state.category, page, state.column_map);
                state.column_map = table.column_map;
                self.finish_table(table, &state.category, stats)
            }
            Demultiplexed::Split(left, right) => {
                debug!("interpreting split halves independently");
                stats.split_tables += 1;
                let mut records = Vec::new();
                for half in [left, right] {
                    let half = if is_table_hierarchical(&half) {
                        flatten_hierarchical_table(&half, None).0
                    } else {
                        half
                    };
                    let table = self.process_table_data(&half, &state.category, page, None);
                    records.extend(self.finish_table(table, &state.category, stats));
                }
                records
            }
        }
    }

    /// True when the header row, or the inherited column map of a headerless
    /// table, puts the norm or unit in columns 2-3. Such a table is one
    /// four-column layout, not two side-by-side pairs.
    fn has_right_value_columns(&self, grid: &Grid, inherited: Option<ColumnRoleMap>) -> bool {
        let map = match find_header_row(grid, &self.lexicon, self.options.match_threshold) {
            Some(index) => match map_header_indices(
                grid.row(index).unwrap_or_default(),
                &self.lexicon,
                self.options.header_threshold,
            ) {
                HeaderMapping::Matched(map) => map,
                HeaderMapping::Positional => return false,
            },
            None => match inherited {
                Some(map) => map,
                None => return false,
            },
        };
        [ColumnRole::Norm, ColumnRole::Unit]
            .into_iter()
            .filter_map(|role| map.get(role))
            .any(|column| (2..4).contains(&column))
    }

    fn finish_table(
        &self,
        table: TableInterpretation,
        category: &str,
        stats: &mut ParseStats,
    ) -> Vec<ResultRecord> {
        stats.dropped_rows += table.dropped_rows;
        stats.unparsable_values += table.unparsable_values;
        if table.source.is_some_and(|source| source.is_positional()) {
            stats.positional_fallbacks += 1;
        }

        let mut records = table.records;
        if self.options.clean_antibiotic_names && self.is_antibiotic_category(category) {
            for record in &mut records {
                record.test_name = clean_antibiotic_name(&record.test_name);
            }
        }
        records
    }

    fn is_antibiotic_category(&self, category: &str) -> bool {
        FuzzyMatcher::new(self.options.match_threshold)
            .contains_any(category, &self.lexicon.antibiotic_keywords)
    }
}
