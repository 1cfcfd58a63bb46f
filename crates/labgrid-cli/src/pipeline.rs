//! Per-document stages: parser construction, loading and parsing.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use labgrid_core::{LabReportParser, ParseOutcome};
use labgrid_lexicon::{Lexicon, load_default_lexicon, load_lexicon};
use labgrid_model::{Document, FlowDocument, ParserOptions};

/// Input layout of the documents in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Pages with table and text-line geometry.
    Paged,
    /// Paragraphs and tables in body order.
    Flow,
}

/// The lexicon at `path`, else the one named by `LABGRID_LEXICON`, else the
/// built-in one.
pub fn resolve_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    match path {
        Some(path) => {
            load_lexicon(path).with_context(|| format!("load lexicon {}", path.display()))
        }
        None => load_default_lexicon().context("load default lexicon"),
    }
}

pub fn build_parser(lexicon: Lexicon, options: ParserOptions) -> Result<LabReportParser> {
    LabReportParser::new(Arc::new(lexicon), options).context("build parser")
}

/// Reads and parses one document.
pub fn parse_file(parser: &LabReportParser, path: &Path, kind: InputKind) -> Result<ParseOutcome> {
    let outcome = match kind {
        InputKind::Paged => {
            let document = Document::load(path)
                .with_context(|| format!("read document {}", path.display()))?;
            debug!(pages = document.pages.len(), "document loaded");
            parser.parse_document(&document)
        }
        InputKind::Flow => {
            let document = FlowDocument::load(path)
                .with_context(|| format!("read flow document {}", path.display()))?;
            debug!(blocks = document.blocks.len(), "flow document loaded");
            parser.parse_flow(&document)
        }
    };
    info!(
        records = outcome.results.len(),
        positional_fallbacks = outcome.stats.positional_fallbacks,
        dropped_rows = outcome.stats.dropped_rows,
        "document parsed"
    );
    Ok(outcome)
}
