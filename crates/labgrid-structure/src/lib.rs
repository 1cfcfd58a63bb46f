//! Table structure engine.
//!
//! Turns raw extraction grids into regular tables before any column role is
//! assigned: null canonicalization, ghost-column trimming, complementary
//! column merging, hierarchical index flattening and side-by-side table
//! splitting. Every function returns a new grid.

pub mod clean;
pub mod demux;
pub mod hierarchy;

pub use clean::{
    canonicalize, clean_and_normalize, find_keyword_row, merge_complementary_columns,
    trim_ghost_columns,
};
pub use demux::{Demultiplexed, column_mean_length, demultiplex, is_double_wide};
pub use hierarchy::{flatten_hierarchical_table, is_table_hierarchical};
