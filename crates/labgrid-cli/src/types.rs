use std::path::PathBuf;

use labgrid_core::ParseStats;

/// Result of one input document.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub path: PathBuf,
    /// Where the output was written; `None` when printed to stdout.
    pub output: Option<PathBuf>,
    pub records: usize,
    pub patient_found: bool,
    pub stats: ParseStats,
}

/// A document that could not be read, parsed or written.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Results of one `parse` invocation.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub documents: Vec<DocumentSummary>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}
