//! Raw table grids as delivered by the extraction layer.
//!
//! A [`Grid`] is an ordered list of rows of optional strings. Rows may have
//! different lengths. The canonical empty marker is `None`; every accessor
//! treats null-like text (`""`, whitespace, the literal `"None"`) the same
//! way, so un-canonicalized grids read consistently.

use serde::{Deserialize, Serialize};

/// A single grid cell. `None` is the canonical empty marker.
pub type Cell = Option<String>;

/// Returns true for text the extraction layer uses to mean "no value".
pub fn is_null_like(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == "None"
}

/// Normalizes a cell to the canonical empty marker when it is null-like.
pub fn canonical_cell(cell: Option<&str>) -> Cell {
    match cell {
        Some(text) if !is_null_like(text) => Some(text.to_string()),
        _ => None,
    }
}

/// Ordered rows of optional strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a grid from plain text rows; every cell is kept verbatim.
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Non-empty text at `(row, column)`, or `None` when the cell is missing
    /// or null-like.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
            .filter(|text| !is_null_like(text))
    }

    /// Non-empty text of every row at `column` (`None` for empty or missing).
    pub fn column(&self, column: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }

    /// Every non-empty cell with its coordinates, row-major.
    pub fn non_empty_cells(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells.iter().enumerate().filter_map(move |(c, cell)| {
                cell.as_deref()
                    .filter(|text| !is_null_like(text))
                    .map(|text| (r, c, text))
            })
        })
    }

    /// Returns a grid keeping only columns in `range`.
    pub fn slice_columns(&self, range: std::ops::Range<usize>) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|cells| {
                range
                    .clone()
                    .map(|c| cells.get(c).cloned().flatten())
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_like_cells_read_as_empty() {
        let grid = Grid::new(vec![vec![
            Some("None".to_string()),
            Some("   ".to_string()),
            None,
            Some("x".to_string()),
        ]]);
        assert_eq!(grid.cell(0, 0), None);
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(0, 2), None);
        assert_eq!(grid.cell(0, 3), Some("x"));
        assert_eq!(grid.cell(0, 9), None);
        assert_eq!(grid.cell(5, 0), None);
    }

    #[test]
    fn width_is_widest_row() {
        let grid = Grid::from_text_rows(vec![vec!["a"], vec!["a", "b", "c"], vec![]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
    }

    #[test]
    fn slice_pads_short_rows() {
        let grid = Grid::from_text_rows(vec![vec!["a", "b", "c", "d"], vec!["e"]]);
        let right = grid.slice_columns(2..4);
        assert_eq!(right.cell(0, 0), Some("c"));
        assert_eq!(right.cell(0, 1), Some("d"));
        assert_eq!(right.row(1).map(<[Cell]>::len), Some(2));
        assert_eq!(right.cell(1, 0), None);
    }

    #[test]
    fn deserializes_from_nested_arrays() {
        let grid: Grid = serde_json::from_str(r#"[["a", null], ["b"]]"#).unwrap();
        assert_eq!(grid.cell(0, 0), Some("a"));
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.width(), 2);
    }
}
