//! Host command execution
//!
//! Runs one command string through the platform shell and captures
//! everything it printed.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// What a finished command left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    /// stdout followed by stderr, lossily decoded
    pub combined: String,
    /// Exit status was zero
    pub succeeded: bool,
}

impl ExecutionOutput {
    pub fn success(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
            succeeded: true,
        }
    }

    pub fn failure(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
            succeeded: false,
        }
    }
}

/// Runs shell command strings on behalf of the agent
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> ExecutionOutput;
}

/// Which interpreter commands are handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    PowerShell,
}

impl ShellKind {
    /// The shell used on the current host
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellKind::PowerShell
        } else {
            ShellKind::Bash
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShellKind::Bash => "bash",
            ShellKind::PowerShell => "PowerShell",
        }
    }

    fn program_and_args<'a>(&self, command: &'a str) -> (&'static str, Vec<&'a str>) {
        match self {
            ShellKind::Bash => ("bash", vec!["-c", command]),
            ShellKind::PowerShell => ("powershell", vec!["-NoProfile", "-Command", command]),
        }
    }
}

/// Executes commands with the host's own shell
#[derive(Debug, Clone)]
pub struct HostShell {
    kind: ShellKind,
}

impl HostShell {
    pub fn new() -> Self {
        Self::with_kind(ShellKind::host())
    }

    pub fn with_kind(kind: ShellKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ShellKind {
        self.kind
    }
}

impl Default for HostShell {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for HostShell {
    async fn execute(&self, command: &str) -> ExecutionOutput {
        let (program, args) = self.kind.program_and_args(command);

        let mut cmd = Command::new(program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match cmd.output().await {
            Ok(output) => {
                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                combined.push_str(&String::from_utf8_lossy(&output.stderr));
                let succeeded = output.status.success();

                debug!(
                    shell = self.kind.display_name(),
                    exit_code = output.status.code().unwrap_or(-1),
                    output_len = combined.len(),
                    "Command finished"
                );

                ExecutionOutput {
                    combined,
                    succeeded,
                }
            }
            Err(e) => {
                warn!(shell = self.kind.display_name(), error = %e, "Failed to spawn shell");
                ExecutionOutput::failure(format!("failed to start {}: {}", program, e))
            }
        }
    }
}
