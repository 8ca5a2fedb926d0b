//! Initial publication of a provisioned project to its new GitHub repository.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::remote::AuthenticatedRemote;
use crate::config::{CredentialProvider, GitConfig};
use crate::external::CommandRunner;
use crate::workflows::stages::RepositoryPublisher;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("GitHub token is required for pushing to repository")]
    MissingToken,
    #[error("Unsupported repository URL format: {0}")]
    UnsupportedUrl(String),
    #[error("Failed to initialize git repository: {0}")]
    Init(String),
    #[error("Failed to add files to git: {0}")]
    Add(String),
    #[error("Failed to commit files: {0}")]
    Commit(String),
    #[error("Failed to add remote origin: {0}")]
    AddRemote(String),
    #[error("Failed to set main branch: {0}")]
    SetBranch(String),
    #[error("Failed to push to GitHub: {0}")]
    Push(String),
}

/// Commit author written into the new repository's local config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for GitIdentity {
    fn default() -> Self {
        Self {
            name: "Web Developer".to_string(),
            email: "web@developer.com".to_string(),
        }
    }
}

impl From<&GitConfig> for GitIdentity {
    fn from(config: &GitConfig) -> Self {
        Self {
            name: config.user_name.clone(),
            email: config.user_email.clone(),
        }
    }
}

pub const PUBLISH_SUCCESS: &str = "Successfully pushed to GitHub";

pub struct GitPublisher {
    runner: CommandRunner,
    credentials: Arc<dyn CredentialProvider>,
    identity: GitIdentity,
}

impl GitPublisher {
    pub fn new(
        runner: CommandRunner,
        credentials: Arc<dyn CredentialProvider>,
        identity: GitIdentity,
    ) -> Self {
        Self {
            runner,
            credentials,
            identity,
        }
    }

    /// Initialize a repository in `project_path`, commit everything and push
    /// `main` to `remote_url`. Stops at the first failing step.
    pub async fn publish(
        &self,
        project_path: &Path,
        remote_url: &str,
        project_name: &str,
    ) -> Result<(), PublishError> {
        let token = self
            .credentials
            .github_token()
            .ok_or(PublishError::MissingToken)?;
        let remote = AuthenticatedRemote::from_clone_url(remote_url, &token)
            .ok_or_else(|| PublishError::UnsupportedUrl(remote_url.to_string()))?;

        self.step(project_path, &remote, &["git", "init"], PublishError::Init)
            .await?;

        // Identity is best-effort; a global identity may already exist.
        for (key, value) in [
            ("user.name", self.identity.name.as_str()),
            ("user.email", self.identity.email.as_str()),
        ] {
            let result = self
                .runner
                .run(&["git", "config", key, value], Some(project_path))
                .await;
            if !result.success {
                debug!(key, output = %result.output, "Ignoring git config failure");
            }
        }

        let commit_message = format!("Initial commit for {project_name}");
        self.step(project_path, &remote, &["git", "add", "."], PublishError::Add)
            .await?;
        self.step(
            project_path,
            &remote,
            &["git", "commit", "-m", &commit_message],
            PublishError::Commit,
        )
        .await?;
        self.step(
            project_path,
            &remote,
            &["git", "remote", "add", "origin", remote.as_str()],
            PublishError::AddRemote,
        )
        .await?;
        self.step(
            project_path,
            &remote,
            &["git", "branch", "-M", "main"],
            PublishError::SetBranch,
        )
        .await?;
        self.step(
            project_path,
            &remote,
            &["git", "push", "-u", "origin", "main"],
            PublishError::Push,
        )
        .await?;

        info!(path = %project_path.display(), "Pushed project to GitHub");
        Ok(())
    }

    async fn step(
        &self,
        project_path: &Path,
        remote: &AuthenticatedRemote,
        command: &[&str],
        on_failure: fn(String) -> PublishError,
    ) -> Result<(), PublishError> {
        let result = self.runner.run(command, Some(project_path)).await;
        if result.success {
            Ok(())
        } else {
            Err(on_failure(remote.redact(&result.output)))
        }
    }
}

#[async_trait]
impl RepositoryPublisher for GitPublisher {
    async fn publish(
        &self,
        project_path: &Path,
        remote_url: &str,
        project_name: &str,
    ) -> Result<(), PublishError> {
        GitPublisher::publish(self, project_path, remote_url, project_name).await
    }
}
