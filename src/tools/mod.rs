//! The tool surface: one method per remotely-invokable tool.
//!
//! Every tool returns a single human-readable status string and never fails;
//! all errors are rendered into that string.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Instrument};

use crate::config::{CredentialProvider, WebsiteGeneratorConfig};
use crate::external::{CommandRunner, ProcessCommandExecutor};
use crate::fs::ProjectFiles;
use crate::git::{
    generate_commit_message, ChangePublisher, CloneTarget, GitIdentity, GitPublisher,
    TemplateProvisioner,
};
use crate::github::GitHubForgeClient;
use crate::project::{project_path, ProjectDescriptor, ProjectName};
use crate::telemetry::{create_tool_span, generate_correlation_id};
use crate::workflows::{SetupWorkflow, WorkflowError};

pub const MISSING_TOKEN_MESSAGE: &str =
    "GitHub Token is missing. Cannot process repository setup requests.";

pub struct WebsiteGenerator {
    credentials: Arc<dyn CredentialProvider>,
    workflow: Arc<SetupWorkflow>,
    changes: ChangePublisher,
    files: ProjectFiles,
    base_directory: PathBuf,
    use_temporary_directory: bool,
}

impl WebsiteGenerator {
    /// Wire the production components from configuration.
    pub fn from_config(
        config: &WebsiteGeneratorConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let runner = CommandRunner::new(Arc::new(ProcessCommandExecutor::with_timeout(
            config.command_timeout(),
        )));
        let target = if config.workspace.use_temporary_directory {
            CloneTarget::Fresh
        } else {
            CloneTarget::ReplaceExisting
        };

        let workflow = SetupWorkflow::new(
            Arc::new(TemplateProvisioner::new(
                runner.clone(),
                config.template.repository_url.clone(),
                target,
            )),
            Arc::new(GitHubForgeClient::from_config(&config.github, credentials.clone())),
            Arc::new(GitPublisher::new(
                runner.clone(),
                credentials.clone(),
                GitIdentity::from(&config.git),
            )),
        );

        Self::new(credentials, workflow, runner, config)
    }

    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        workflow: SetupWorkflow,
        runner: CommandRunner,
        config: &WebsiteGeneratorConfig,
    ) -> Self {
        Self {
            credentials,
            workflow: Arc::new(workflow),
            changes: ChangePublisher::new(runner),
            files: ProjectFiles::new(),
            base_directory: config.workspace.base_directory.clone(),
            use_temporary_directory: config.workspace.use_temporary_directory,
        }
    }

    /// Clone the template, create the GitHub repository and push the code.
    pub async fn repo_setup(&self, project_name: &str, description: &str, deploy: bool) -> String {
        let correlation_id = generate_correlation_id();
        let span = create_tool_span("repo_setup", Some(project_name), &correlation_id);
        async {
            if self.credentials.github_token().is_none() {
                return MISSING_TOKEN_MESSAGE.to_string();
            }
            let name = match ProjectName::parse(project_name) {
                Ok(name) => name,
                Err(e) => return e.to_string(),
            };

            match self.setup(name, description, deploy).await {
                Ok(message) => message,
                Err(e) => {
                    error!(error = %e, "Repository setup failed");
                    e.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn setup(
        &self,
        name: ProjectName,
        description: &str,
        deploy: bool,
    ) -> Result<String, WorkflowError> {
        if !self.use_temporary_directory {
            let project = ProjectDescriptor::new(name, description, self.base_directory.clone());
            let report = self.workflow.clone().run_isolated(project, deploy).await?;
            return Ok(report.to_string());
        }

        // Removed when `staging` drops, on every exit path.
        let staging = tempfile::Builder::new()
            .prefix("website-generator-")
            .tempdir()
            .map_err(|e| WorkflowError::Unexpected(e.to_string()))?;
        let project = ProjectDescriptor::new(name, description, staging.path());
        let report = self.workflow.clone().run_isolated(project, deploy).await?;
        Ok(report.to_string())
    }

    /// Write a file, creating its directory if needed.
    pub async fn create_file(&self, file_name: &str, file_path: &str, content: &str) -> String {
        render(self.files.create_file(file_path, file_name, content).await)
    }

    /// Commit and push every change in the named project with a timestamped message.
    pub async fn push_changes(&self, project_name: &str) -> String {
        let correlation_id = generate_correlation_id();
        let span = create_tool_span("push_changes", Some(project_name), &correlation_id);
        async {
            let name = match ProjectName::parse(project_name) {
                Ok(name) => name,
                Err(e) => return e.to_string(),
            };
            let path = project_path(&self.base_directory, &name);
            let commit_message = generate_commit_message();

            match self.changes.publish_changes(&path, &commit_message).await {
                Ok(outcome) => {
                    info!(project = %name, "Change publication finished");
                    outcome.message()
                }
                Err(e) => {
                    error!(project = %name, error = %e, "Change publication failed");
                    e.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn read_file(&self, file_path: &str) -> String {
        render(self.files.read_file(file_path).await)
    }

    pub async fn list_files(&self, directory_path: &str) -> String {
        match self.files.list_files(directory_path).await {
            Ok(items) if items.is_empty() => format!("Directory '{}' is empty.", directory_path.trim()),
            Ok(items) => items.join("\n"),
            Err(e) => e.to_string(),
        }
    }

    pub async fn update_file(&self, file_path: &str, new_content: &str) -> String {
        render(self.files.update_file(file_path, new_content).await)
    }
}

fn render<E: std::fmt::Display>(result: Result<String, E>) -> String {
    match result {
        Ok(message) => message,
        Err(e) => e.to_string(),
    }
}
