use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabGridError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LabGridError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabGridError>;
