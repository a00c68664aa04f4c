use anyhow::{anyhow, bail, Context, Result};

use kiln::application::{Aggregation, CoverageAggregator, CoverageCollector};
use kiln::config::Config;
use kiln::domain::services::IgnoreReason;
use kiln::domain::value_objects::ExecutionContext;
use kiln::infrastructure::{JsonReportRenderer, JsonTraceRepository, SystemLauncher};
use kiln::KilnError;

/// Default report name when several contexts are merged
const COMBINED_REPORT: &str = "combined";

pub fn cmd_collect(
    config: &Config,
    context: &str,
    args: Vec<String>,
    json: bool,
) -> Result<()> {
    let ctx = config
        .coverage
        .context(context)
        .ok_or_else(|| KilnError::UnknownContext {
            name: context.to_string(),
        })?;

    let collector = collector(config, args);
    let collected = collector
        .collect(ctx)
        .with_context(|| format!("failed to collect coverage for '{}'", context))?;

    if json {
        crate::ui::json::emit_complete(
            "collect",
            serde_json::json!({
                "context": collected.context,
                "kind": collected.kind.as_str(),
                "trace": collected.path,
                "touched": collected.touched,
            }),
        )?;
    } else {
        println!(
            "Collected '{}' ({}): {} binaries touched",
            collected.context,
            collected.kind,
            collected.touched.len()
        );
        println!("Trace: {}", collected.path.display());
    }
    Ok(())
}

pub fn cmd_coverage(
    config: &Config,
    names: &[String],
    no_run: bool,
    report: Option<&str>,
    args: Vec<String>,
    json: bool,
) -> Result<()> {
    let contexts = select_contexts(config, names)?;
    let report = report_name(report, &contexts)?;

    if no_run && !args.is_empty() {
        bail!("extra arguments need a run; drop --no-run or the arguments after '--'");
    }
    if !no_run {
        let collector = collector(config, args);
        let mut failures = Vec::new();
        for (ctx, result) in contexts.iter().zip(collector.collect_all(&contexts)) {
            if let Err(e) = result {
                tracing::error!(context = ctx.name(), error = %e, "collection failed");
                failures.push(e);
            }
        }
        if let Some(first) = failures.into_iter().next() {
            return Err(anyhow!(first)).context("coverage collection failed, no report written");
        }
    }

    let artifacts: Vec<_> = contexts
        .iter()
        .map(|ctx| ctx.trace_path(&config.coverage.trace_dir))
        .collect();
    let aggregator = CoverageAggregator::from_config(JsonTraceRepository::new(), &config.coverage)?;
    let aggregation = aggregator
        .aggregate(&artifacts)
        .context("failed to aggregate coverage")?;
    let path = aggregator
        .report(
            &JsonReportRenderer::new(),
            &aggregation,
            &config.coverage.report_dir,
            &report,
        )
        .with_context(|| format!("failed to write report '{}'", report))?;

    if json {
        crate::ui::json::emit_complete(
            "coverage",
            serde_json::json!({
                "report": report,
                "path": path,
                "traces": aggregation.traces,
                "binaries": aggregation.outcome.model,
                "excluded": aggregation.outcome.stats.binaries_excluded,
                "ignored_records": aggregation.outcome.stats.ignored.len(),
            }),
        )?;
    } else {
        print_summary(&aggregation);
        println!("Report: {}", path.display());
    }
    Ok(())
}

fn collector(
    config: &Config,
    args: Vec<String>,
) -> CoverageCollector<SystemLauncher, JsonTraceRepository> {
    CoverageCollector::new(
        SystemLauncher::new(),
        JsonTraceRepository::new(),
        &config.coverage,
    )
    .with_extra_args(args)
}

/// Requested contexts in the order given, or every configured context.
fn select_contexts(config: &Config, names: &[String]) -> Result<Vec<ExecutionContext>> {
    if names.is_empty() {
        if config.coverage.contexts.is_empty() {
            bail!("no execution contexts configured in [[coverage.contexts]]");
        }
        return Ok(config.coverage.contexts.clone());
    }

    let mut selected: Vec<ExecutionContext> = Vec::new();
    for name in names {
        let ctx = config
            .coverage
            .context(name)
            .ok_or_else(|| KilnError::UnknownContext { name: name.clone() })?;
        if !selected.iter().any(|c| c.name() == ctx.name()) {
            selected.push(ctx.clone());
        }
    }
    Ok(selected)
}

fn report_name(requested: Option<&str>, contexts: &[ExecutionContext]) -> Result<String> {
    let name = match (requested, contexts) {
        (Some(name), _) => name.to_string(),
        (None, [single]) => single.name().to_string(),
        (None, _) => COMBINED_REPORT.to_string(),
    };
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("report name '{}' must be a plain directory name", name);
    }
    Ok(name)
}

fn print_summary(aggregation: &Aggregation) {
    let model = &aggregation.outcome.model;
    let stats = &aggregation.outcome.stats;

    let rows: Vec<Vec<String>> = model
        .iter()
        .map(|(name, coverage)| vec![name.clone(), coverage.covered_count().to_string()])
        .collect();
    print!("{}", crate::ui::table::render(&["BINARY", "COVERED"], &rows));

    println!(
        "{} traces ({}), {} binaries ({} excluded), {} covered locations",
        stats.traces,
        aggregation.traces.join(", "),
        model.binary_count(),
        stats.binaries_excluded,
        model.covered_locations()
    );
    let unknown = stats.ignored_count(IgnoreReason::Unknown);
    let mismatched = stats.ignored_count(IgnoreReason::Mismatched);
    if unknown + mismatched > 0 {
        println!(
            "Ignored records: {} outside the instrumented set, {} from another build",
            unknown, mismatched
        );
    }
}
