use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kiln - resource packaging and cross-execution coverage tool
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the project configuration [default: kiln.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The configuration file and whether it must exist.
    ///
    /// An explicit `--config` must point at a real file; the default
    /// `kiln.toml` may be absent, in which case defaults apply.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(kiln::config::CONFIG_FILE_NAME), false),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror source assets into the packaged directory and rewrite its manifest
    Sync {
        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite the manifest of the packaged directory as it is
    Manifest,

    /// Verify the packaged directory and manifest (non-zero exit on drift)
    Check,

    /// Run one execution context under instrumentation
    Collect {
        /// Context name from [[coverage.contexts]]
        context: String,

        /// Extra arguments appended to the context's command (after `--`)
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Collect traces and merge them into one coverage report
    Coverage {
        /// Contexts to include (default: all configured)
        #[arg(long = "context", value_delimiter = ',')]
        contexts: Vec<String>,

        /// Merge existing trace artifacts without launching anything
        #[arg(long)]
        no_run: bool,

        /// Report name (default: `combined`, or the context name for a single context)
        #[arg(long)]
        report: Option<String>,

        /// Extra arguments appended to every selected context's command (after `--`)
        #[arg(last = true)]
        args: Vec<String>,
    },
}
