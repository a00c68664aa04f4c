//! System process launcher
//!
//! Implements the ProcessLauncher port with `std::process::Command`.
//! The child inherits stdin/stdout/stderr so test and application output
//! stays visible.

use std::process::Command;

use crate::domain::ports::process_launcher::{ExitOutcome, LaunchRequest, ProcessLauncher};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, request: &LaunchRequest) -> std::io::Result<ExitOutcome> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args).envs(&request.env);
        if let Some(dir) = &request.working_dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status()?;
        Ok(ExitOutcome {
            success: status.success(),
            status: status.to_string(),
        })
    }
}
