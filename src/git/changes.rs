//! Incremental publication of edits to an already-published project.

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::external::CommandRunner;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChangeError {
    #[error("Not a git repository. Please ensure the project is initialized with git.")]
    NotRepository,
    #[error("Failed to check git status: {0}")]
    Status(String),
    #[error("Failed to stage changes: {0}")]
    Stage(String),
    #[error("Failed to commit changes: {0}")]
    Commit(String),
    #[error("Failed to push changes: {0}")]
    Push(String),
}

/// Successful terminal states. "Nothing to do" is deliberately distinct from a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    NoChanges,
    Pushed { commit_message: String },
}

impl ChangeOutcome {
    pub fn message(&self) -> String {
        match self {
            ChangeOutcome::NoChanges => "No changes to commit.".to_string(),
            ChangeOutcome::Pushed { commit_message } => format!(
                "Successfully committed and pushed changes with message: '{commit_message}'"
            ),
        }
    }
}

/// Timestamped message used for automatic commits, second resolution.
pub fn generate_commit_message() -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("Auto-commit: Update project files - {timestamp}")
}

#[derive(Debug, Clone)]
pub struct ChangePublisher {
    runner: CommandRunner,
}

impl ChangePublisher {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    /// Stage, commit and push every working-tree change under `project_path`.
    ///
    /// Relies on the upstream configured by the initial publish; no remote or
    /// branch is named.
    pub async fn publish_changes(
        &self,
        project_path: &Path,
        commit_message: &str,
    ) -> Result<ChangeOutcome, ChangeError> {
        if !project_path.join(".git").exists() {
            return Err(ChangeError::NotRepository);
        }

        let status = self
            .runner
            .run(&["git", "status", "--porcelain"], Some(project_path))
            .await;
        if !status.success {
            return Err(ChangeError::Status(status.output));
        }
        if status.output.trim().is_empty() {
            info!(path = %project_path.display(), "Working tree clean, nothing to push");
            return Ok(ChangeOutcome::NoChanges);
        }

        let staged = self.runner.run(&["git", "add", "."], Some(project_path)).await;
        if !staged.success {
            return Err(ChangeError::Stage(staged.output));
        }

        let committed = self
            .runner
            .run(&["git", "commit", "-m", commit_message], Some(project_path))
            .await;
        if !committed.success {
            return Err(ChangeError::Commit(committed.output));
        }

        let pushed = self.runner.run(&["git", "push"], Some(project_path)).await;
        if !pushed.success {
            return Err(ChangeError::Push(pushed.output));
        }

        info!(path = %project_path.display(), commit_message, "Pushed project changes");
        Ok(ChangeOutcome::Pushed {
            commit_message: commit_message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mock::ScriptedExecutor;
    use std::sync::Arc;

    fn repo_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_metadata_runs_no_git_command() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(ScriptedExecutor::new());

        let err = ChangePublisher::new(CommandRunner::new(executor.clone()))
            .publish_changes(dir.path(), "msg")
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Not a git repository."));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clean_tree_stops_after_status() {
        let dir = repo_dir();
        let executor = Arc::new(ScriptedExecutor::new().stdout_for("status", "  \n"));

        let outcome = ChangePublisher::new(CommandRunner::new(executor.clone()))
            .publish_changes(dir.path(), "msg")
            .await
            .unwrap();

        assert_eq!(outcome, ChangeOutcome::NoChanges);
        assert_eq!(outcome.message(), "No changes to commit.");
        assert_eq!(executor.call_lines(), vec!["git status --porcelain"]);
    }

    #[tokio::test]
    async fn test_dirty_tree_is_committed_and_pushed() {
        let dir = repo_dir();
        let executor = Arc::new(ScriptedExecutor::new().stdout_for("status", " M src/App.jsx\n"));

        let outcome = ChangePublisher::new(CommandRunner::new(executor.clone()))
            .publish_changes(dir.path(), "Update hero section")
            .await
            .unwrap();

        assert_eq!(
            outcome.message(),
            "Successfully committed and pushed changes with message: 'Update hero section'"
        );
        assert_eq!(
            executor.call_lines(),
            vec![
                "git status --porcelain",
                "git add .",
                "git commit -m Update hero section",
                "git push",
            ]
        );
    }

    #[tokio::test]
    async fn test_status_failure_is_attributed() {
        let dir = repo_dir();
        let executor = Arc::new(ScriptedExecutor::new().fail_on("status", "fatal: bad index"));

        let err = ChangePublisher::new(CommandRunner::new(executor))
            .publish_changes(dir.path(), "msg")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to check git status: fatal: bad index");
    }

    #[tokio::test]
    async fn test_push_failure_is_attributed() {
        let dir = repo_dir();
        let executor = Arc::new(
            ScriptedExecutor::new()
                .stdout_for("status", "?? new.txt\n")
                .fail_on("push", "no upstream branch"),
        );

        let err = ChangePublisher::new(CommandRunner::new(executor))
            .publish_changes(dir.path(), "msg")
            .await
            .unwrap_err();

        assert_eq!(err, ChangeError::Push("no upstream branch".to_string()));
    }

    #[test]
    fn test_commit_message_format() {
        let message = generate_commit_message();
        let timestamp = message
            .strip_prefix("Auto-commit: Update project files - ")
            .unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
