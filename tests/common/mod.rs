//! Common test utilities for Kiln CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the CLI
//! - Fixtures: Reusable config and trace content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
