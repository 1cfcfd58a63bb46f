//! Row interpretation: grid rows to result records.

use labgrid_model::{ColumnRole, ColumnRoleMap, Grid, ResultRecord};
use tracing::{debug, trace};

use crate::columns::{HeaderMapping, find_header_row, map_header_indices};
use crate::document::LabReportParser;

/// Where the column map of a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSource {
    /// A row of the table matched a result keyword.
    HeaderRow { index: usize, positional: bool },
    /// No header row; the map of an earlier table applies to every row.
    Inherited,
    /// No header row and nothing inherited; the first row was consumed.
    ForcedFirstRow { positional: bool },
}

impl MapSource {
    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            Self::HeaderRow {
                positional: true,
                ..
            } | Self::ForcedFirstRow { positional: true }
        )
    }
}

/// Records of one table plus what is needed to update document state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInterpretation {
    pub records: Vec<ResultRecord>,
    /// The map used, to be carried to the next table.
    pub column_map: Option<ColumnRoleMap>,
    pub source: Option<MapSource>,
    /// Rows dropped for being too narrow or lacking a name or result.
    pub dropped_rows: usize,
    /// Records whose result is neither a number nor a duration.
    pub unparsable_values: usize,
}

impl TableInterpretation {
    fn empty(column_map: Option<ColumnRoleMap>) -> Self {
        Self {
            records: Vec::new(),
            column_map,
            source: None,
            dropped_rows: 0,
            unparsable_values: 0,
        }
    }
}

fn mapping_source(mapping: HeaderMapping, index: Option<usize>) -> MapSource {
    let positional = mapping.is_positional();
    match index {
        Some(index) => MapSource::HeaderRow { index, positional },
        None => MapSource::ForcedFirstRow { positional },
    }
}

impl LabReportParser {
    /// Converts a cleaned grid into normalized records.
    ///
    /// The column map comes from the table's own header row when one
    /// exists, else from `inherited` (every row is data), else from the
    /// first row, which is then skipped. A row becomes a record only when
    /// it has at least two cells and both a test name and a result.
    pub fn process_table_data(
        &self,
        grid: &Grid,
        category: &str,
        page: usize,
        inherited: Option<ColumnRoleMap>,
    ) -> TableInterpretation {
        if grid.is_empty() {
            return TableInterpretation::empty(inherited);
        }

        let lexicon = self.lexicon();
        let options = self.options();
        let (column_map, start, source) =
            match (find_header_row(grid, lexicon, options.match_threshold), inherited) {
                (Some(index), _) => {
                    let row = grid.row(index).unwrap_or_default();
                    let mapping = map_header_indices(row, lexicon, options.header_threshold);
                    (mapping.column_map(), index + 1, mapping_source(mapping, Some(index)))
                }
                (None, Some(map)) => (map, 0, MapSource::Inherited),
                (None, None) => {
                    let row = grid.row(0).unwrap_or_default();
                    let mapping = map_header_indices(row, lexicon, options.header_threshold);
                    (mapping.column_map(), 1, mapping_source(mapping, None))
                }
            };
        if source.is_positional() {
            debug!(category, page, "no result column header, using positional layout");
        }

        let mut drafts = Vec::new();
        let mut dropped_rows = 0;
        for row_index in start..grid.height() {
            if grid.row(row_index).map_or(0, <[_]>::len) < 2 {
                dropped_rows += 1;
                continue;
            }
            let field = |role: ColumnRole| {
                column_map
                    .get(role)
                    .and_then(|column| grid.cell(row_index, column))
            };
            let (Some(name), Some(result)) =
                (field(ColumnRole::TestName), field(ColumnRole::Result))
            else {
                dropped_rows += 1;
                continue;
            };
            trace!(test = name, result, "row");
            drafts.push(
                ResultRecord::draft(category, page, name.trim(), result)
                    .with_norm(field(ColumnRole::Norm).map(str::to_string))
                    .with_unit(field(ColumnRole::Unit).map(str::to_string)),
            );
        }
        if dropped_rows > 0 {
            debug!(category, page, dropped_rows, "dropped incomplete rows");
        }

        let records = self.normalizer().normalize(drafts);
        let unparsable_values = records.iter().filter(|r| r.is_text_only()).count();
        TableInterpretation {
            records,
            column_map: Some(column_map),
            source: Some(source),
            dropped_rows,
            unparsable_values,
        }
    }
}
