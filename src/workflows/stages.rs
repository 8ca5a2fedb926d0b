//! Seams between the setup workflow and the components that do the work.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::git::provision::ProvisionError;
use crate::git::publish::PublishError;
use crate::github::CreateRepositoryError;
use crate::project::{ProjectName, RemoteRepository};

/// Stage 1: materialize the template under `destination_root/<name>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateCloner: Send + Sync {
    async fn clone_project(
        &self,
        name: &ProjectName,
        destination_root: &Path,
    ) -> Result<PathBuf, ProvisionError>;

    /// Template repository this cloner copies from.
    fn template_url(&self) -> String;
}

/// Stage 2: create the remote repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryCreator: Send + Sync {
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RemoteRepository, CreateRepositoryError>;
}

/// Stage 3: publish the working tree to the remote repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryPublisher: Send + Sync {
    async fn publish(
        &self,
        project_path: &Path,
        remote_url: &str,
        project_name: &str,
    ) -> Result<(), PublishError>;
}
