//! Lab-report table interpretation.
//!
//! [`LabReportParser`] turns extracted pages (tables with geometry plus
//! text lines) or flow documents (paragraphs and tables) into patient
//! metadata and normalized [`labgrid_model::ResultRecord`]s. Parsing never
//! fails: ambiguous structure degrades to positional layouts, incomplete
//! rows are dropped and unreadable values stay as text, all counted in
//! [`ParseStats`].

pub mod columns;
pub mod document;
pub mod error;
pub mod header;
pub mod interpreter;
pub mod metadata;
pub mod patient;

pub use columns::{HeaderMapping, find_header_row, map_header_indices};
pub use document::{DocumentState, LabReportParser, ParseOutcome, ParseStats};
pub use error::ParserError;
pub use header::{best_label, find_label_above, label_candidates, score_label};
pub use interpreter::{MapSource, TableInterpretation};
pub use metadata::find_printed_at;
pub use patient::{
    FINDING_TEST_NAME, PatientExtraction, PatientTextScanner, adjacent_value, find_findings,
    is_patient_table, read_patient_table,
};
