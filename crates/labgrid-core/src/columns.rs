//! Column role mapping from header rows.

use labgrid_lexicon::Lexicon;
use labgrid_match::find_best_match;
use labgrid_model::{Cell, ColumnRole, ColumnRoleMap, Grid, is_null_like};
use labgrid_structure::find_keyword_row;

/// How a header row was mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMapping {
    /// At least the result role was found by keyword.
    Matched(ColumnRoleMap),
    /// No result keyword; the fixed name/result/norm/unit layout applies.
    Positional,
}

impl HeaderMapping {
    pub fn column_map(&self) -> ColumnRoleMap {
        match self {
            Self::Matched(map) => *map,
            Self::Positional => ColumnRoleMap::positional(),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Positional)
    }
}

/// Index of the first row with a cell matching a result keyword.
pub fn find_header_row(grid: &Grid, lexicon: &Lexicon, threshold: f64) -> Option<usize> {
    find_keyword_row(grid, lexicon.role_keywords(ColumnRole::Result), threshold)
}

/// Binds each role to the first header cell matching one of its keywords.
/// Roles are independent: one cell may serve two roles.
pub fn map_header_indices(row: &[Cell], lexicon: &Lexicon, threshold: f64) -> HeaderMapping {
    let mut map = ColumnRoleMap::default();
    for role in ColumnRole::ALL {
        let keywords = lexicon.role_keywords(role);
        let found = row.iter().position(|cell| {
            cell.as_deref()
                .filter(|text| !is_null_like(text))
                .is_some_and(|text| find_best_match(text, keywords, threshold).is_some())
        });
        if let Some(index) = found {
            map.set(role, index);
        }
    }
    if map.is_bound(ColumnRole::Result) {
        HeaderMapping::Matched(map)
    } else {
        HeaderMapping::Positional
    }
}
