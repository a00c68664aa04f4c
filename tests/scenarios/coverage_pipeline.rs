//! Scenario: Combined Coverage
//!
//! Journey: CI runs the unit tests and a demo application run under
//! instrumentation and publishes one merged report.
//!
//! Success Criteria:
//! - Each context leaves its own trace artifact
//! - Lines covered by either run are covered in the report
//! - Support code and binaries outside the build never show up

#![cfg(unix)]

use crate::common::*;

#[test]
fn scenario_two_contexts_merge_into_combined_report() {
    let env = coverage_project();

    let result = env.run(&["coverage"]);
    assert!(result.success, "coverage failed:\n{}", result.combined_output());

    assert!(env.exists("target/coverage/test.trace"));
    assert!(env.exists("target/coverage/run.trace"));

    let report: serde_json::Value =
        serde_json::from_str(&env.read_file("coverage/combined/coverage.json")).unwrap();
    assert_eq!(report["report"], "combined");
    assert_eq!(report["traces"], serde_json::json!(["test", "run"]));
    assert_eq!(
        report["binaries"]["app/X.class"]["covered"],
        serde_json::json!([1, 2, 3])
    );
    assert_eq!(report["binaries"]["app/Z.class"]["covered_count"], 0);
    assert!(report["binaries"].get("app/Y.class").is_none());
    assert!(report["binaries"].get("app/support/Helper.class").is_none());
    assert_eq!(report["totals"]["binaries"], 2);
    assert_eq!(report["totals"]["covered_locations"], 3);
}

#[test]
fn scenario_single_context_report_is_named_after_it() {
    let env = coverage_project();

    let result = env.run(&["coverage", "--context", "test"]);
    assert!(result.success, "coverage failed:\n{}", result.combined_output());

    assert!(env.exists("coverage/test/coverage.json"));
    assert!(!env.exists("target/coverage/run.trace"));
}

#[test]
fn scenario_failed_execution_blocks_report() {
    let env = coverage_project();
    env.write_file(
        "kiln.toml",
        &COVERAGE_CONFIG.replace("cp fixtures/test.json", "exit 3; cp fixtures/test.json"),
    );

    let result = env.run(&["coverage"]);

    assert!(!result.success);
    assert!(result.stderr.contains("execution 'test' failed"));
    assert!(!env.exists("coverage/combined/coverage.json"));
}

#[test]
fn scenario_no_run_merges_existing_traces() {
    let env = coverage_project();
    assert!(env.run(&["collect", "test"]).success);
    assert!(env.run(&["collect", "run"]).success);

    // Remove the fixtures so any launch would fail
    std::fs::remove_dir_all(env.project_path("fixtures")).unwrap();
    let result = env.run(&["coverage", "--no-run", "--json"]);

    assert!(result.success, "coverage failed:\n{}", result.combined_output());
    let event = result.last_event();
    assert_eq!(event["command"], "coverage");
    assert_eq!(event["data"]["report"], "combined");
    assert_eq!(event["data"]["ignored_records"], 2);
}

#[test]
fn scenario_missing_trace_aborts_no_run() {
    let env = coverage_project();
    assert!(env.run(&["collect", "test"]).success);

    let result = env.run(&["coverage", "--no-run"]);

    assert!(!result.success);
    assert!(result.stderr.contains("trace artifact not found"));
}

#[test]
fn scenario_trailing_args_reach_the_context_command() {
    let env = coverage_project();
    env.write_file(
        "kiln.toml",
        &COVERAGE_CONFIG.replace(
            r#"command = ["sh", "-c", "cp fixtures/test.json \"$KILN_TRACE_FILE\""]"#,
            r#"command = ["sh", "-c", "echo \"$@\" > args.txt && cp fixtures/test.json \"$KILN_TRACE_FILE\"", "sh"]"#,
        ),
    );

    let result = env.run(&["collect", "test", "--", "--tests", "*EnumRegistryTest"]);

    assert!(result.success, "collect failed:\n{}", result.combined_output());
    assert_eq!(env.read_file("args.txt").trim(), "--tests *EnumRegistryTest");
}

#[test]
fn scenario_trailing_args_with_no_run_are_rejected() {
    let env = coverage_project();

    let result = env.run(&["coverage", "--no-run", "--", "--tests", "*Foo"]);

    assert!(!result.success);
    assert!(result.stderr.contains("extra arguments need a run"));
}
