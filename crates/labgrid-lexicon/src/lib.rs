#![deny(unsafe_code)]

pub mod error;
pub mod lexicon;
pub mod loaders;

pub use crate::error::LexiconError;
pub use crate::lexicon::{ColumnKeywords, Lexicon, PatientLabels, TimeKeywords, UnitSuffix};
pub use crate::loaders::{LEXICON_ENV_VAR, load_default_lexicon, load_lexicon};
