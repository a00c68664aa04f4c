//! Command handlers
//!
//! Each handler receives the loaded configuration, wires the concrete
//! infrastructure into a use case and prints the outcome.

pub mod check;
pub mod coverage;
pub mod manifest;
pub mod sync;
