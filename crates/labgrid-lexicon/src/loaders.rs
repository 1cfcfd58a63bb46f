use std::path::{Path, PathBuf};

use crate::error::LexiconError;
use crate::lexicon::Lexicon;

/// Environment variable naming a JSON lexicon that replaces the built-in one.
pub const LEXICON_ENV_VAR: &str = "LABGRID_LEXICON";

/// Loads and validates a lexicon from a JSON file.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, LexiconError> {
    let text = std::fs::read_to_string(path).map_err(|e| LexiconError::io(path, e))?;
    let lexicon: Lexicon = serde_json::from_str(&text).map_err(|source| LexiconError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    lexicon.validate()?;
    Ok(lexicon)
}

/// The lexicon named by `LABGRID_LEXICON`, or the built-in one.
pub fn load_default_lexicon() -> Result<Lexicon, LexiconError> {
    match std::env::var_os(LEXICON_ENV_VAR) {
        Some(path) if !path.is_empty() => load_lexicon(&PathBuf::from(path)),
        _ => Ok(Lexicon::default()),
    }
}
