//! Result writers.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use labgrid_core::ParseOutcome;
use labgrid_model::{PatientInfo, ResultRecord};

/// Output format of a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The full outcome: patient, results, metadata and counters.
    Json,
    /// One row per result record.
    Csv,
    /// Text tables for reading in a terminal.
    Table,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Table => "txt",
        }
    }
}

/// Output file for `input` inside `dir`: the input's file stem with the
/// format's extension.
pub fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "document".into(), |stem| stem.to_string_lossy());
    dir.join(format!("{stem}.{}", format.extension()))
}

pub fn write_outcome<W: Write>(
    writer: &mut W,
    outcome: &ParseOutcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, outcome),
        OutputFormat::Csv => write_csv(writer, &outcome.results),
        OutputFormat::Table => write_tables(writer, outcome),
    }
}

fn write_json<W: Write>(writer: &mut W, outcome: &ParseOutcome) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, outcome).context("serialize outcome")?;
    writeln!(writer)?;
    Ok(())
}

/// Writes the records with a header row; an empty list writes nothing.
pub fn write_csv<W: Write>(writer: &mut W, records: &[ResultRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record).context("write csv record")?;
    }
    csv_writer.flush().context("flush csv")?;
    Ok(())
}

fn write_tables<W: Write>(writer: &mut W, outcome: &ParseOutcome) -> Result<()> {
    if !outcome.patient.is_empty() {
        writeln!(writer, "{}", patient_table(&outcome.patient))?;
    }
    if let Some(printed_at) = &outcome.metadata.printed_at {
        writeln!(writer, "Printed: {printed_at}")?;
    }
    writeln!(writer, "{}", results_table(&outcome.results))?;
    Ok(())
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
}

pub fn patient_table(patient: &PatientInfo) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Patient", ""]);
    let fields = [
        ("Name", patient.name.clone()),
        ("Date of birth", patient.dob.clone()),
        ("Report date", patient.report_date.clone()),
        ("Height, cm", patient.height_cm.map(|cm| format!("{cm}"))),
        ("Weight, kg", patient.weight_kg.map(|kg| format!("{kg}"))),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            table.add_row(vec![label.to_string(), value]);
        }
    }
    table
}

pub fn results_table(records: &[ResultRecord]) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Category", "Page", "Test", "Value", "Text", "Norm", "Unit"]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.category),
            Cell::new(record.page).set_alignment(CellAlignment::Right),
            Cell::new(&record.test_name),
            Cell::new(record.value.map(|v| format!("{v}")).unwrap_or_default())
                .set_alignment(CellAlignment::Right),
            Cell::new(&record.text_value),
            Cell::new(record.norm.as_deref().unwrap_or_default()),
            Cell::new(record.unit.as_deref().unwrap_or_default()),
        ]);
    }
    table
}
