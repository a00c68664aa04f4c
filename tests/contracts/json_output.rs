//! Contract tests for `--json` output.
//!
//! CI consumes stdout as NDJSON, so stdout must carry events only and
//! every log line must go to stderr.

use crate::common::*;

fn assert_single_event(result: &TestResult, command: &str) -> serde_json::Value {
    let lines: Vec<&str> = result
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    assert_eq!(
        lines.len(),
        1,
        "CONTRACT: --json must print exactly one event, got:\n{}",
        result.stdout
    );
    let event = result.last_event();
    assert_eq!(event["event"], "complete");
    assert_eq!(event["command"], command);
    assert!(event["version"].is_string());
    event
}

/// CONTRACT: `kiln sync --json` prints one `complete` event on stdout,
/// even at high verbosity.
#[test]
fn contract_sync_json_is_single_event() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("core/init.lua", "return {}");

    let result = env.run(&["sync", "--json", "-vvv"]);
    assert!(result.success, "sync failed:\n{}", result.combined_output());

    let event = assert_single_event(&result, "sync");
    assert_eq!(event["data"]["added"], 1);
}

/// CONTRACT: `kiln check --json` reports drift in its event and still
/// exits non-zero.
#[test]
fn contract_check_json_reports_drift() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("core/init.lua", "return {}");

    let result = env.run(&["check", "--json"]);
    assert!(!result.success);

    let event = assert_single_event(&result, "check");
    assert_eq!(event["data"]["clean"], false);
}

/// CONTRACT: `kiln coverage --json` prints one event naming the report.
#[cfg(unix)]
#[test]
fn contract_coverage_json_is_single_event() {
    let env = coverage_project();

    let result = env.run(&["coverage", "--json", "-vv"]);
    assert!(result.success, "coverage failed:\n{}", result.combined_output());

    let event = assert_single_event(&result, "coverage");
    assert_eq!(event["data"]["report"], "combined");
}
