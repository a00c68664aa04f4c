//! Terminal and JSON output for the CLI.

pub mod json;
pub mod table;
