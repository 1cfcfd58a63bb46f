//! Hierarchical index tables.
//!
//! Some reports number leaf rows in the first column and interleave
//! un-numbered group rows ("Epithelium:") whose children follow with an
//! empty index cell. Flattening folds the group name into each child's
//! name so every row stands alone.

use labgrid_model::{Cell, Grid, is_null_like};
use tracing::trace;

fn is_index_header(text: &str) -> bool {
    text.to_lowercase().contains("no") || text.contains('№')
}

fn is_numeric_index(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn trimmed(cell: Option<&Cell>) -> &str {
    cell.and_then(|c| c.as_deref())
        .filter(|text| !is_null_like(text))
        .map_or("", str::trim)
}

/// True when the first cell of the first row looks like an index header
/// ("No", "№").
pub fn is_table_hierarchical(grid: &Grid) -> bool {
    grid.row(0)
        .and_then(|cells| cells.first())
        .and_then(|cell| cell.as_deref())
        .is_some_and(|text| is_index_header(text.trim()))
}

/// Folds group rows into the names of the rows that follow them.
///
/// The parent starts as `inherited_parent` so a group can continue across
/// tables and pages; the returned parent is the one active after the last
/// row. A numeric index resets the parent.
pub fn flatten_hierarchical_table(
    grid: &Grid,
    inherited_parent: Option<&str>,
) -> (Grid, Option<String>) {
    let mut parent: Option<String> = inherited_parent.map(str::to_string);
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(grid.height());

    for (index, row) in grid.rows().iter().enumerate() {
        let mut row = row.clone();
        if index == 0 && is_index_header(trimmed(row.first())) {
            rows.push(row);
            continue;
        }
        if row.len() < 2 {
            rows.push(row);
            continue;
        }

        let index_text = trimmed(row.first()).to_string();
        let name_text = trimmed(row.get(1)).to_string();

        if is_numeric_index(&index_text) {
            parent = None;
        } else if !index_text.is_empty() {
            let group = index_text.replace(':', "").trim().to_string();
            trace!(group = %group, "hierarchy group row");
            row[1] = Some(if name_text.is_empty() {
                group.clone()
            } else {
                format!("{group} {name_text}")
            });
            parent = Some(group);
        } else if let Some(group) = &parent
            && !name_text.is_empty()
        {
            row[1] = Some(format!("{group} {name_text}"));
        }
        rows.push(row);
    }

    (Grid::new(rows), parent)
}
