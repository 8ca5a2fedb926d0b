//! Template provisioning: clone the template, then strip its history.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::external::CommandRunner;
use crate::project::{project_path, ProjectName};
use crate::workflows::stages::TemplateCloner;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("Failed to remove existing directory: {0}")]
    RemoveExisting(String),
    #[error("Failed to clone template repository: {0}")]
    Clone(String),
    #[error("Failed to remove .git folder: {0}")]
    RemoveGitMetadata(String),
}

/// Whether an existing project directory is replaced before cloning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneTarget {
    /// Clone into a fresh (typically temporary) root.
    Fresh,
    /// Clone into a persistent base directory, deleting any previous copy first.
    ReplaceExisting,
}

#[derive(Debug, Clone)]
pub struct TemplateProvisioner {
    runner: CommandRunner,
    template_url: String,
    target: CloneTarget,
}

impl TemplateProvisioner {
    pub fn new(runner: CommandRunner, template_url: impl Into<String>, target: CloneTarget) -> Self {
        Self {
            runner,
            template_url: template_url.into(),
            target,
        }
    }

    /// Clone the template into `destination_root/name` and remove its `.git` directory.
    pub async fn clone_template(
        &self,
        name: &ProjectName,
        destination_root: &Path,
    ) -> Result<PathBuf, ProvisionError> {
        let project_path = project_path(destination_root, name);
        let target = project_path.to_string_lossy().to_string();

        let result = self
            .runner
            .run(&["git", "clone", &self.template_url, &target], None)
            .await;
        if !result.success {
            return Err(ProvisionError::Clone(result.output));
        }

        let git_path = project_path.join(".git");
        if git_path.exists() {
            tokio::fs::remove_dir_all(&git_path)
                .await
                .map_err(|e| ProvisionError::RemoveGitMetadata(e.to_string()))?;
            info!(path = %project_path.display(), "Removed .git folder from template clone");
        }

        Ok(project_path)
    }

    /// Like [`clone_template`](Self::clone_template), but first removes a
    /// previous copy of the project under `base_dir`. Destructive, no confirmation.
    pub async fn clone_into_base_directory(
        &self,
        name: &ProjectName,
        base_dir: &Path,
    ) -> Result<PathBuf, ProvisionError> {
        let project_path = project_path(base_dir, name);
        if project_path.exists() {
            tokio::fs::remove_dir_all(&project_path)
                .await
                .map_err(|e| ProvisionError::RemoveExisting(e.to_string()))?;
            info!(path = %project_path.display(), "Removed existing directory");
        }

        let project_path = self.clone_template(name, base_dir).await?;
        info!(path = %project_path.display(), "Successfully cloned template to base directory");
        Ok(project_path)
    }
}

#[async_trait]
impl TemplateCloner for TemplateProvisioner {
    async fn clone_project(
        &self,
        name: &ProjectName,
        destination_root: &Path,
    ) -> Result<PathBuf, ProvisionError> {
        match self.target {
            CloneTarget::Fresh => self.clone_template(name, destination_root).await,
            CloneTarget::ReplaceExisting => {
                self.clone_into_base_directory(name, destination_root).await
            }
        }
    }

    fn template_url(&self) -> String {
        self.template_url.clone()
    }
}
