//! Side-by-side table splitting.

use labgrid_model::Grid;
use tracing::debug;

/// Name columns must be this much longer than their value columns.
const NAME_TO_VALUE_RATIO: f64 = 1.5;

/// Name columns must average more than this many characters.
const MIN_NAME_LENGTH: f64 = 3.0;

/// Result of [`demultiplex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Demultiplexed {
    Single(Grid),
    Split(Grid, Grid),
}

impl Demultiplexed {
    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split(..))
    }

    pub fn into_tables(self) -> Vec<Grid> {
        match self {
            Self::Single(grid) => vec![grid],
            Self::Split(left, right) => vec![left, right],
        }
    }
}

/// Mean character length of the non-empty cells of a column; 0 when the
/// column has none.
pub fn column_mean_length(grid: &Grid, column: usize) -> f64 {
    let (total, count) = grid
        .column(column)
        .flatten()
        .fold((0usize, 0usize), |(total, count), text| {
            (total + text.trim().chars().count(), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// True when columns 0-1 and 2-3 each look like a Name|Value pair.
pub fn is_double_wide(grid: &Grid) -> bool {
    if grid.width() < 4 {
        return false;
    }
    let [name_a, value_a, name_b, value_b] = [0, 1, 2, 3].map(|c| column_mean_length(grid, c));
    name_a > NAME_TO_VALUE_RATIO * value_a
        && name_b > NAME_TO_VALUE_RATIO * value_b
        && name_a > MIN_NAME_LENGTH
        && name_b > MIN_NAME_LENGTH
}

/// Splits a double-wide table into its two Name|Value halves.
pub fn demultiplex(grid: Grid) -> Demultiplexed {
    if !is_double_wide(&grid) {
        return Demultiplexed::Single(grid);
    }
    debug!(rows = grid.height(), "splitting side-by-side table");
    Demultiplexed::Split(grid.slice_columns(0..2), grid.slice_columns(2..4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(lengths: [usize; 4]) -> Vec<String> {
        lengths.iter().map(|&n| "x".repeat(n)).collect()
    }

    #[test]
    fn long_names_short_values_split() {
        let grid = Grid::from_text_rows(vec![cells([18, 2, 20, 2]), cells([18, 2, 20, 2])]);
        let split = demultiplex(grid);
        assert!(split.is_split());
        let tables = split.into_tables();
        assert_eq!(tables.len(), 2);
        assert!(tables.iter().all(|t| t.width() == 2));
        assert_eq!(tables[1].cell(0, 0).map(str::len), Some(20));
    }

    #[test]
    fn balanced_columns_stay_whole() {
        let grid = Grid::from_text_rows(vec![cells([5, 4, 6, 5])]);
        assert_eq!(demultiplex(grid.clone()), Demultiplexed::Single(grid));
    }

    #[test]
    fn narrow_tables_stay_whole() {
        let grid = Grid::from_text_rows(vec![vec!["Hemoglobin", "140", "g/L"]]);
        assert!(!is_double_wide(&grid));
    }

    #[test]
    fn empty_columns_average_zero() {
        let grid = Grid::new(vec![vec![None, Some("ab".to_string())]]);
        assert_eq!(column_mean_length(&grid, 0), 0.0);
        assert_eq!(column_mean_length(&grid, 1), 2.0);
    }
}
