//! Subprocess boundary.
//!
//! Everything that shells out (`git`, `gcloud`) goes through [`CommandRunner`]
//! so the callers can be exercised with fakes instead of real subprocesses.

use crate::error::{Result, SecretsError};
use std::process::{Command, Stdio};

/// Captured result of one subprocess invocation.
///
/// A non-zero exit is not an error at this layer; callers decide what a
/// failed `git check-ignore` or `gcloud` run means. Only failing to spawn
/// the program at all surfaces as `Err`.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands for real, with stdin closed and both streams captured.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SecretsError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.success {
            tracing::debug!(program, status = ?output.status, stderr = %result.stderr.trim_end(), "command failed");
        }
        Ok(result)
    }
}
