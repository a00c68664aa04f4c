//! Scenario: Packaging Script Assets
//!
//! Journey: A developer edits scripts in the source tree and packages them.
//!
//! Steps:
//! 1. Packaged directory holds a stale copy and a file deleted upstream
//! 2. `kiln sync` reconciles it and writes the manifest
//! 3. `kiln check` confirms nothing drifted
//! 4. A manual edit in the packaged directory is reported as drift
//! 5. `kiln sync` repairs it

use crate::common::*;

#[test]
fn scenario_stale_and_stray_assets_converge() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("core/a.lua", "return 'a'");
    env.write_file("core/b.lua", "return 'b2'");
    env.write_file("pkg/b.lua", "return 'b1'");
    env.write_file("pkg/c.lua", "return 'c'");
    env.write_file("pkg/logo.png", "not a script");

    // Step 2
    let result = env.run(&["sync"]);
    assert!(result.success, "sync failed:\n{}", result.combined_output());
    assert_eq!(
        env.list_dir("pkg"),
        vec![".manifest", "a.lua", "b.lua", "logo.png"]
    );
    assert_eq!(env.read_file("pkg/b.lua"), "return 'b2'");
    assert_eq!(env.read_file("pkg/.manifest"), "a.lua\nb.lua");
    assert!(result.stdout.contains("1 added, 1 updated, 1 deleted"));

    // Step 3
    let result = env.run(&["check"]);
    assert!(result.success, "check failed:\n{}", result.combined_output());

    // Step 4
    env.write_file("pkg/a.lua", "hand edited");
    let result = env.run(&["check"]);
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("update a.lua"));
    assert!(result.stderr.contains("drift"));

    // Step 5
    let result = env.run(&["sync"]);
    assert!(result.success);
    assert_eq!(env.read_file("pkg/a.lua"), "return 'a'");
    assert!(env.run(&["check"]).success);
}

#[test]
fn scenario_rerun_is_noop() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("core/init.lua", "return {}");

    assert!(env.run(&["sync"]).success);
    let manifest_before = env.read_file("pkg/.manifest");

    let result = env.run(&["sync", "--json"]);
    assert!(result.success);
    let event = result.last_event();
    assert_eq!(event["data"]["added"], 0);
    assert_eq!(event["data"]["updated"], 0);
    assert_eq!(event["data"]["deleted"], 0);
    assert_eq!(event["data"]["unchanged"], 1);
    assert_eq!(env.read_file("pkg/.manifest"), manifest_before);
}

#[test]
fn scenario_missing_source_leaves_package_alone() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("pkg/a.lua", "keep me");
    env.write_file("pkg/.manifest", "a.lua");

    let result = env.run(&["sync"]);

    assert!(!result.success);
    assert!(result.stderr.contains("source directory not found"));
    assert_eq!(env.read_file("pkg/a.lua"), "keep me");
    assert_eq!(env.read_file("pkg/.manifest"), "a.lua");
}
