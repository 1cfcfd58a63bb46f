//! Data model shared by the labgrid crates.

pub mod error;
pub mod grid;
pub mod layout;
pub mod options;
pub mod record;
pub mod roles;

pub use error::{LabGridError, Result};
pub use grid::{Cell, Grid, canonical_cell, is_null_like};
pub use layout::{BBox, Document, FlowBlock, FlowDocument, Page, PageTable, TextLine};
pub use options::{DEFAULT_CATEGORY, ParserOptions};
pub use record::{DocumentMetadata, MICROBIOLOGY_CATEGORY, PatientInfo, ResultRecord};
pub use roles::{ColumnRole, ColumnRoleMap};
