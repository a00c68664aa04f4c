//! Reusable test content.

use super::env::TestEnv;

/// Resources section pointing at `core/` and `pkg/`
pub const RESOURCES_CONFIG: &str = r#"
[resources]
source = "core"
destination = "pkg"
extension = "lua"
"#;

/// Binaries of a small instrumented build: one production class and one
/// support class that the default exclusions remove.
pub const BINARIES: &[(&str, &str)] = &[
    ("app/X.class", "class X"),
    ("app/Z.class", "class Z"),
    ("app/support/Helper.class", "class Helper"),
];

/// Write the instrumented binaries under `target/instrumented/`
pub fn write_binaries(env: &TestEnv) {
    for (name, content) in BINARIES {
        env.write_file(&format!("target/instrumented/{}", name), content);
    }
}

/// A version 1 trace artifact covering `lines` of each binary
pub fn trace_json(context: &str, kind: &str, records: &[(&str, Vec<u32>)]) -> String {
    let records: Vec<_> = records
        .iter()
        .map(|(binary, lines)| serde_json::json!({ "binary": binary, "covered": lines }))
        .collect();
    serde_json::json!({
        "format": "kiln-trace",
        "version": 1,
        "context": { "kind": kind, "name": context },
        "records": records,
    })
    .to_string()
}

/// Coverage config with a unit-test and an application context, each of
/// which copies a prepared trace fixture to the path kiln hands it.
pub const COVERAGE_CONFIG: &str = r#"
[coverage]
exclude = ["**/support/**"]

[[coverage.contexts]]
kind = "unit-tests"
name = "test"
command = ["sh", "-c", "cp fixtures/test.json \"$KILN_TRACE_FILE\""]

[[coverage.contexts]]
kind = "application"
name = "run"
working_dir = "app"
command = ["sh", "-c", "test -f init.lua && cp ../fixtures/run.json \"$KILN_TRACE_FILE\""]
"#;

/// Project wired for `kiln coverage`: binaries, fixtures, app directory.
pub fn coverage_project() -> TestEnv {
    let env = TestEnv::with_config(COVERAGE_CONFIG);
    write_binaries(&env);
    env.write_file("app/init.lua", "return {}");
    env.write_file(
        "fixtures/test.json",
        &trace_json("test", "unit-tests", &[("app/X.class", vec![1, 2])]),
    );
    env.write_file(
        "fixtures/run.json",
        &trace_json(
            "run",
            "application",
            &[
                ("app/X.class", vec![2, 3]),
                ("app/Y.class", vec![9]),
                ("app/support/Helper.class", vec![1]),
            ],
        ),
    );
    env
}
