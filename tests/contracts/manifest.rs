//! Contract tests for the manifest format.
//!
//! Packaged runtimes read the manifest line by line, so its exact bytes
//! are part of the interface.

use crate::common::*;

/// CONTRACT: Manifest entries are sorted bytewise, one per line, with no
/// trailing newline.
///
/// Uppercase names sort before lowercase ones, matching a plain byte
/// comparison rather than a locale-aware one.
#[test]
fn contract_manifest_is_bytewise_sorted_without_trailing_newline() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    env.write_file("core/list.lua", "");
    env.write_file("core/Zeta.lua", "");
    env.write_file("core/alpha.lua", "");

    let result = env.run(&["sync"]);
    assert!(result.success, "sync failed:\n{}", result.combined_output());

    assert_eq!(
        env.read_file("pkg/.manifest"),
        "Zeta.lua\nalpha.lua\nlist.lua",
        "CONTRACT: manifest must be sorted bytewise with no trailing newline"
    );
}

/// CONTRACT: The manifest never lists itself, even when its name carries
/// the managed extension.
#[test]
fn contract_manifest_never_lists_itself() {
    let env = TestEnv::with_config(
        r#"
[resources]
source = "core"
destination = "pkg"
extension = "lua"
manifest = "index.lua"
"#,
    );
    env.write_file("core/init.lua", "");

    assert!(env.run(&["sync"]).success);
    assert!(env.run(&["sync"]).success);

    assert_eq!(
        env.read_file("pkg/index.lua"),
        "init.lua",
        "CONTRACT: manifest must not list itself"
    );
}

/// CONTRACT: An empty source yields an empty manifest file, not a
/// missing one.
#[test]
fn contract_empty_source_writes_empty_manifest() {
    let env = TestEnv::with_config(RESOURCES_CONFIG);
    std::fs::create_dir_all(env.project_path("core")).unwrap();

    let result = env.run(&["sync"]);
    assert!(result.success, "sync failed:\n{}", result.combined_output());

    assert!(env.exists("pkg/.manifest"));
    assert_eq!(env.read_file("pkg/.manifest"), "");
}
