//! Library components of the `labgrid` binary.

pub mod logging;
pub mod output;
pub mod pipeline;
pub mod types;
