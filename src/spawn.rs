// ABOUTME: Process spawning seam used to run rsync.
// ABOUTME: Defines the Spawner trait and the tokio-backed ProcessSpawner.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::command::CommandInvocation;

/// Errors from running an external program.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Runs a command invocation to completion.
///
/// Resolves once the child has exited successfully; any other outcome is an
/// error. Implementations must not return before the process has finished.
#[async_trait]
pub trait Spawner: Send + Sync {
    async fn spawn(&self, invocation: &CommandInvocation) -> Result<(), SpawnError>;
}

/// Spawns real child processes with tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSpawner;

impl ProcessSpawner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Spawner for ProcessSpawner {
    async fn spawn(&self, invocation: &CommandInvocation) -> Result<(), SpawnError> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.arguments).stdin(Stdio::null());

        // Verbose runs stream rsync's own output to the terminal.
        if invocation.options.verbose {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        let output = command.output().await.map_err(|e| SpawnError::Launch {
            program: invocation.program.clone(),
            source: e,
        })?;

        if output.status.success() {
            return Ok(());
        }

        Err(SpawnError::Exit {
            program: invocation.program.clone(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
