//! CLI command implementations.

pub mod import_csv;
pub mod serve;
