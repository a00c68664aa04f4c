//! Kiln CLI - resource packaging and cross-execution coverage tool
//!
//! Usage: kiln <COMMAND>
//!
//! Commands:
//!   sync      Mirror source assets and rewrite the manifest
//!   manifest  Rewrite the manifest only
//!   check     Verify packaged assets and manifest (CI)
//!   collect   Run one execution context under instrumentation
//!   coverage  Collect and merge traces into one report

mod cli;
mod commands;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config_path, required) = cli.config_path();
    let (config, warnings) = kiln::config::load_project(&config_path, required)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    match cli.command {
        Commands::Sync { dry_run } => commands::sync::cmd_sync(&config, dry_run, cli.json),
        Commands::Manifest => commands::manifest::cmd_manifest(&config, cli.json),
        Commands::Check => commands::check::cmd_check(&config, cli.json),
        Commands::Collect { context, args } => {
            commands::coverage::cmd_collect(&config, &context, args, cli.json)
        }
        Commands::Coverage {
            contexts,
            no_run,
            report,
            args,
        } => commands::coverage::cmd_coverage(
            &config,
            &contexts,
            no_run,
            report.as_deref(),
            args,
            cli.json,
        ),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("kiln={}", level))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
