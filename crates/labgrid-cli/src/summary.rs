use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labgrid_cli::types::{BatchResult, DocumentSummary};

/// Per-document counts plus a total row.
pub fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Records"),
        header_cell("Tables"),
        header_cell("Skipped"),
        header_cell("Split"),
        header_cell("Dropped rows"),
        header_cell("Fallbacks"),
        header_cell("Text only"),
        header_cell("Patient"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 8, CellAlignment::Center);

    let mut total_records = 0usize;
    let mut total_dropped = 0usize;
    for summary in &result.documents {
        total_records += summary.records;
        total_dropped += summary.stats.dropped_rows;
        table.add_row(document_row(summary));
    }
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(failure.path.display()).fg(Color::Red),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total_dropped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn document_row(summary: &DocumentSummary) -> Vec<Cell> {
    let stats = &summary.stats;
    let name = match &summary.output {
        Some(output) => format!("{} -> {}", summary.path.display(), output.display()),
        None => summary.path.display().to_string(),
    };
    vec![
        Cell::new(name),
        Cell::new(summary.records),
        Cell::new(stats.tables),
        dim_cell(stats.skipped_tables),
        count_cell(stats.split_tables, Color::Blue),
        count_cell(stats.dropped_rows, Color::Yellow),
        count_cell(stats.positional_fallbacks, Color::Yellow),
        dim_cell(stats.unparsable_values),
        if summary.patient_found {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("no")
        },
    ]
}

/// Prints failures to stderr, one per line.
pub fn print_failures(result: &BatchResult) {
    if result.failures.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for failure in &result.failures {
        eprintln!("- {}: {}", failure.path.display(), failure.error);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
