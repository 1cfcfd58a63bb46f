#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("invalid {family} duration pattern: {source}")]
    TimePattern {
        family: &'static str,
        #[source]
        source: regex::Error,
    },
}
