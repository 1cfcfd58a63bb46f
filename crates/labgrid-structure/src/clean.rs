use labgrid_match::is_fuzzy_match;
use labgrid_model::{Cell, Grid, canonical_cell, is_null_like};
use tracing::debug;

/// Replaces null-like cells with `None` and pads rows to the widest row.
pub fn canonicalize(grid: &Grid) -> Grid {
    let width = grid.width();
    let rows = grid
        .rows()
        .iter()
        .map(|cells| {
            let mut row: Vec<Cell> = cells
                .iter()
                .map(|cell| canonical_cell(cell.as_deref()))
                .collect();
            row.resize(width, None);
            row
        })
        .collect();
    Grid::new(rows)
}

/// Index of the first row with a cell matching any of `keywords`.
pub fn find_keyword_row<S: AsRef<str>>(
    grid: &Grid,
    keywords: &[S],
    threshold: f64,
) -> Option<usize> {
    grid.rows().iter().position(|cells| {
        cells
            .iter()
            .filter_map(|cell| cell.as_deref())
            .filter(|text| !is_null_like(text))
            .any(|text| {
                keywords
                    .iter()
                    .any(|k| is_fuzzy_match(text, k.as_ref(), threshold))
            })
    })
}

/// Drops columns to the right of the last populated cell of the header
/// row, the first row matching a result keyword. Grids without such a row
/// are returned unchanged.
pub fn trim_ghost_columns<S: AsRef<str>>(
    grid: &Grid,
    result_keywords: &[S],
    threshold: f64,
) -> Grid {
    let Some(header) = find_keyword_row(grid, result_keywords, threshold) else {
        return grid.clone();
    };
    let header_width = grid.row(header).map_or(0, <[Cell]>::len);
    let Some(last) = (0..header_width).rev().find(|&c| grid.cell(header, c).is_some()) else {
        return grid.clone();
    };
    if last + 1 < grid.width() {
        debug!(header, kept = last + 1, width = grid.width(), "trimmed ghost columns");
    }
    grid.slice_columns(0..last + 1)
}

/// Merges each adjacent column pair whose populated cells never share a
/// row. The left column keeps its own values and takes the right column's
/// values where it is empty; the right column is removed. A column that
/// was absorbed is not compared with its own right neighbour, and two
/// entirely empty columns are left alone.
pub fn merge_complementary_columns(grid: &Grid) -> Grid {
    let width = grid.width();
    let height = grid.height();
    if width < 2 {
        return grid.clone();
    }

    let mut columns: Vec<Vec<Cell>> = (0..width)
        .map(|c| grid.column(c).map(|cell| cell.map(str::to_string)).collect())
        .collect();
    let mut absorbed = vec![false; width];

    for left in 0..width - 1 {
        if absorbed[left] {
            continue;
        }
        let right = left + 1;
        let overlap =
            (0..height).any(|r| columns[left][r].is_some() && columns[right][r].is_some());
        if overlap {
            continue;
        }
        let any_data =
            (0..height).any(|r| columns[left][r].is_some() || columns[right][r].is_some());
        if !any_data {
            continue;
        }
        let taken = std::mem::take(&mut columns[right]);
        for (slot, value) in columns[left].iter_mut().zip(taken) {
            if slot.is_none() {
                *slot = value;
            }
        }
        absorbed[right] = true;
        debug!(left, right, "merged complementary columns");
    }

    let kept: Vec<Vec<Cell>> = columns
        .into_iter()
        .zip(absorbed)
        .filter_map(|(column, absorbed)| (!absorbed).then_some(column))
        .collect();
    let rows = (0..height)
        .map(|r| kept.iter().map(|column| column[r].clone()).collect())
        .collect();
    Grid::new(rows)
}

/// Canonicalization, ghost trimming and complementary merge, in that order.
pub fn clean_and_normalize<S: AsRef<str>>(
    grid: &Grid,
    result_keywords: &[S],
    threshold: f64,
) -> Grid {
    let grid = canonicalize(grid);
    let grid = trim_ghost_columns(&grid, result_keywords, threshold);
    merge_complementary_columns(&grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT: [&str; 2] = ["result", "результат"];

    fn grid(rows: Vec<Vec<Option<&str>>>) -> Grid {
        Grid::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        )
    }

    #[test]
    fn canonicalize_pads_and_nulls() {
        let raw = grid(vec![vec![Some("a"), Some("None")], vec![Some(" ")]]);
        let clean = canonicalize(&raw);
        assert_eq!(clean.rows()[0], vec![Some("a".to_string()), None]);
        assert_eq!(clean.rows()[1], vec![None, None]);
    }

    #[test]
    fn ghost_columns_after_header_are_dropped() {
        let raw = grid(vec![
            vec![Some("Test"), Some("Result"), None, None],
            vec![Some("Hb"), Some("140"), None, Some("x")],
        ]);
        let trimmed = trim_ghost_columns(&raw, &RESULT, 85.0);
        assert_eq!(trimmed.width(), 2);
        assert_eq!(trimmed.cell(1, 1), Some("140"));
    }

    #[test]
    fn no_header_means_no_trim() {
        let raw = grid(vec![vec![Some("Hb"), Some("140"), None]]);
        assert_eq!(trim_ghost_columns(&raw, &RESULT, 85.0), raw);
    }

    #[test]
    fn complementary_columns_merge() {
        let raw = grid(vec![
            vec![Some("Hb"), Some("140"), None],
            vec![Some("Ery"), None, Some("4.5")],
        ]);
        let merged = merge_complementary_columns(&raw);
        assert_eq!(merged.width(), 2);
        assert_eq!(merged.cell(0, 1), Some("140"));
        assert_eq!(merged.cell(1, 1), Some("4.5"));
    }

    #[test]
    fn merges_do_not_chain() {
        // 1 absorbs 2; 2 is not then compared with 3.
        let raw = grid(vec![
            vec![Some("a"), Some("b"), None, None],
            vec![Some("c"), None, None, Some("d")],
        ]);
        let merged = merge_complementary_columns(&raw);
        assert_eq!(merged.width(), 3);
        assert_eq!(merged.cell(1, 2), Some("d"));
    }

    #[test]
    fn empty_pairs_are_kept() {
        let raw = grid(vec![vec![None, None, Some("a")], vec![None, None, Some("b")]]);
        let merged = merge_complementary_columns(&raw);
        assert_eq!(merged.width(), 2);
        assert_eq!(merged.cell(0, 0), None);
        assert_eq!(merged.cell(0, 1), Some("a"));
        assert_eq!(merged.cell(1, 1), Some("b"));
    }
}
