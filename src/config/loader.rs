//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::Config;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema
    #[error("invalid config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The configuration parsed but violates an invariant
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Non-fatal configuration warning (e.g. an unknown key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_with_warnings(path, &content)
}

/// Parse configuration content; `path` is only used for messages.
pub fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the project configuration.
///
/// A missing file yields defaults unless `required` is set (an explicit
/// `--config` must exist). Environment overrides are applied, relative
/// paths are resolved against the file's directory, and the result is
/// validated.
pub fn load_project(
    path: &Path,
    required: bool,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let (config, warnings) = if path.exists() || required {
        load_with_warnings(path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        (Config::default(), Vec::new())
    };

    // Absolute, since contexts may run in another working directory
    let base = match path.parent() {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        parent => {
            let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            cwd.join(parent.unwrap_or(Path::new("")))
        }
    };
    let config = with_env_overrides(config, |key| std::env::var(key).ok()).resolved(&base);
    config.validate()?;
    Ok((config, warnings))
}

/// Apply environment variable overrides (`KILN_*` prefix).
///
/// `lookup` is injected so overrides can be exercised without mutating the
/// process environment.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // KILN_EXCLUDE (comma-separated, replaces the configured list)
    if let Some(patterns) = lookup("KILN_EXCLUDE") {
        config.coverage.exclude = patterns
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(dir) = lookup("KILN_TRACE_DIR").filter(|d| !d.is_empty()) {
        config.coverage.trace_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup("KILN_REPORT_DIR").filter(|d| !d.is_empty()) {
        config.coverage.report_dir = PathBuf::from(dir);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "resources",
        "source",
        "destination",
        "extension",
        "manifest",
        "coverage",
        "binaries",
        "binary_extension",
        "exclude",
        "trace_dir",
        "trace_env",
        "report_dir",
        "contexts",
        "kind",
        "name",
        "command",
        "working_dir",
        "env",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
