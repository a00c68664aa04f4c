//! Configuration module for Kiln
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KILN_*)
//! 3. Project config (kiln.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! The loaded `Config` is passed explicitly into every use case; nothing
//! reads configuration from global state.

mod loader;
mod types;

pub use loader::{
    load_project, load_with_warnings, parse_with_warnings, with_env_overrides, ConfigError,
    ConfigWarning, CONFIG_FILE_NAME,
};
pub use types::{Config, CoverageConfig, ResourcesConfig};
