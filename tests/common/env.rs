//! Test environment for isolated Kiln runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a Kiln CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse the last stdout line as a JSON event
    pub fn last_event(&self) -> serde_json::Value {
        let line = self
            .stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .last()
            .unwrap_or_else(|| panic!("no stdout, stderr:\n{}", self.stderr));
        serde_json::from_str(line).unwrap_or_else(|e| panic!("not JSON ({}): {}", e, line))
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
    kiln_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            kiln_bin: PathBuf::from(env!("CARGO_BIN_EXE_kiln")),
        }
    }

    /// Project with a `kiln.toml` already written
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        env.write_file("kiln.toml", config);
        env
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run kiln from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run kiln from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.kiln_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("KILN_EXCLUDE")
            .env_remove("KILN_TRACE_DIR")
            .env_remove("KILN_REPORT_DIR");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute kiln");
        to_result(output)
    }

    /// Write a file, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.project_path(relative).exists()
    }

    /// Sorted file names directly inside a project directory
    pub fn list_dir(&self, relative: &str) -> Vec<String> {
        list_files(&self.project_path(relative))
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
