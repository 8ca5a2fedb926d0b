//! Base command execution abstraction
//!
//! Provides the foundational trait for executing external commands, enabling
//! dependency injection for testing, and the [`CommandRunner`] that folds every
//! outcome into a uniform [`CommandResult`].

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Upper bound on the wall-clock duration of a single external process.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Command failed: {message}")]
    ExecutionFailed { message: String },
    #[error("Command failed: {command}: executable not found")]
    CommandNotFound { command: String },
    #[error("Command timed out after {:.1} seconds", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },
    #[error("Command failed: {message}")]
    Io { message: String },
    #[error("Command failed: no executable given")]
    EmptyCommand,
}

/// Outcome of a single external process.
///
/// `output` holds stdout on success and stderr (or a synthesized error
/// description) on failure. It is always populated, possibly with an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
}

impl CommandResult {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

impl From<CommandOutput> for CommandResult {
    fn from(output: CommandOutput) -> Self {
        if output.success() {
            Self::succeeded(output.stdout)
        } else {
            Self::failed(output.stderr)
        }
    }
}

/// Trait for executing external commands
///
/// This abstraction allows the rest of the codebase to execute commands
/// without directly depending on tokio::process::Command, enabling testing
/// with scripted implementations.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError>;
}

/// Real implementation using tokio::process::Command
#[derive(Debug, Clone)]
pub struct ProcessCommandExecutor {
    timeout: Duration,
}

impl ProcessCommandExecutor {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProcessCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        let mut command = tokio::process::Command::new(program);
        command
            .args(args)
            .stdin(std::process::Stdio::null())
            // Never block on an interactive credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| CommandError::Timeout {
                timeout: self.timeout,
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    CommandError::Io {
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Runs tokenized commands and never fails: every outcome becomes a [`CommandResult`].
#[derive(Clone)]
pub struct CommandRunner {
    executor: Arc<dyn CommandExecutor>,
}

impl CommandRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Runner backed by real processes with the default timeout.
    pub fn system() -> Self {
        Self::new(Arc::new(ProcessCommandExecutor::new()))
    }

    /// Run `command` (executable first, then literal arguments) in `working_dir`,
    /// or the current directory when `None`.
    pub async fn run(&self, command: &[&str], working_dir: Option<&Path>) -> CommandResult {
        let Some((program, args)) = command.split_first() else {
            return CommandResult::failed(CommandError::EmptyCommand.to_string());
        };
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

        // Only the subcommand is logged; later arguments may carry credentials.
        debug!(
            program = %program,
            subcommand = args.first().map(String::as_str).unwrap_or(""),
            "Running external command"
        );

        match self.executor.execute(program, &args, working_dir).await {
            Ok(output) => output.into(),
            Err(e) => CommandResult::failed(e.to_string()),
        }
    }
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner").finish_non_exhaustive()
    }
}
