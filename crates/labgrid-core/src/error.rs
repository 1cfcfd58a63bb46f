use labgrid_lexicon::LexiconError;
use labgrid_normalization::NormalizationError;

/// Errors raised while building a [`crate::LabReportParser`]. Parsing
/// itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("invalid {family} label pattern: {source}")]
    LabelPattern {
        family: &'static str,
        #[source]
        source: regex::Error,
    },
}
