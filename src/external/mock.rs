//! Scripted command executor for unit tests.

use super::command::{CommandError, CommandExecutor, CommandOutput};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl RecordedCall {
    /// `program` followed by its arguments, joined with single spaces.
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Answers by subcommand (first argument). Unscripted subcommands succeed with empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<HashMap<String, Result<CommandOutput, CommandError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_for(self, subcommand: &str, stdout: &str) -> Self {
        self.respond(
            subcommand,
            Ok(CommandOutput {
                status_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    pub fn fail_on(self, subcommand: &str, stderr: &str) -> Self {
        self.respond(
            subcommand,
            Ok(CommandOutput {
                status_code: 1,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        )
    }

    pub fn respond(self, subcommand: &str, response: Result<CommandOutput, CommandError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(subcommand.to_string(), response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(RecordedCall::line).collect()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            working_dir: working_dir.map(Path::to_path_buf),
        });

        let subcommand = args.first().cloned().unwrap_or_default();
        self.responses
            .lock()
            .unwrap()
            .get(&subcommand)
            .cloned()
            .unwrap_or(Ok(CommandOutput {
                status_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            }))
    }
}
