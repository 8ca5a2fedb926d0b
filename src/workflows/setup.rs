//! The "set up a new project" workflow: clone, create remote, publish.
//!
//! Stages run strictly in order, at most once each, and the first failure
//! ends the run. Nothing is rolled back: a clone made before a failed remote
//! creation, or a remote created before a failed push, stays in place.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::stages::{RepositoryCreator, RepositoryPublisher, TemplateCloner};
use crate::project::{ProjectDescriptor, ProjectName, RemoteRepository, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clone,
    CreateRemote,
    Publish,
    Deploy,
}

struct StageEntry {
    stage: Stage,
    step: u8,
    completed: &'static str,
}

/// Attribution table: the step number reported on failure and the line shown on success.
const STAGES: [StageEntry; 3] = [
    StageEntry {
        stage: Stage::Clone,
        step: 1,
        completed: "Cloned template repository and removed its .git folder",
    },
    StageEntry {
        stage: Stage::CreateRemote,
        step: 2,
        completed: "Created new GitHub repository",
    },
    StageEntry {
        stage: Stage::Publish,
        step: 3,
        completed: "Pushed code to GitHub repository",
    },
];

impl Stage {
    /// Numbered steps only; deployment has no number because it never fails.
    pub fn step_number(self) -> Option<u8> {
        STAGES
            .iter()
            .find(|entry| entry.stage == self)
            .map(|entry| entry.step)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed at Step {step}: {detail}")]
    StageFailed {
        stage: Stage,
        step: u8,
        detail: String,
    },
    #[error("Repository setup failed due to unexpected error: {0}")]
    Unexpected(String),
}

impl WorkflowError {
    pub fn stage_failed(stage: Stage, detail: impl fmt::Display) -> Self {
        match stage.step_number() {
            Some(step) => WorkflowError::StageFailed {
                stage,
                step,
                detail: detail.to_string(),
            },
            None => WorkflowError::Unexpected(detail.to_string()),
        }
    }
}

const DEPLOY_NOT_IMPLEMENTED: &str =
    "⚠️  AWS Amplify deployment is not yet implemented but can be added in future updates.";

/// Successful setup. `Display` renders the user-facing summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub project_name: ProjectName,
    pub project_path: PathBuf,
    pub repository: RemoteRepository,
    pub template_url: String,
    pub deploy_requested: bool,
}

impl fmt::Display for SetupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository setup completed successfully!")?;
        writeln!(f)?;
        writeln!(f, "Project Name: {}", self.project_name)?;
        writeln!(f, "Repository URL: {}", self.repository.web_url())?;
        writeln!(f, "Template Used: {}", self.template_url)?;
        writeln!(f)?;
        writeln!(f, "Steps Completed:")?;
        for entry in &STAGES {
            writeln!(f, "✅ {}", entry.completed)?;
        }
        writeln!(f)?;
        writeln!(f, "Your website project is now ready! You can:")?;
        writeln!(f, "1. Clone the repository locally: git clone {}", self.repository.clone_url)?;
        writeln!(f, "2. Install dependencies: npm install")?;
        writeln!(f, "3. Start development server: npm run dev")?;
        write!(f, "4. Build for production: npm run build")?;
        if self.deploy_requested {
            write!(f, "\n\n{DEPLOY_NOT_IMPLEMENTED}")?;
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct SetupWorkflow {
    cloner: Arc<dyn TemplateCloner>,
    creator: Arc<dyn RepositoryCreator>,
    publisher: Arc<dyn RepositoryPublisher>,
}

impl SetupWorkflow {
    pub fn new(
        cloner: Arc<dyn TemplateCloner>,
        creator: Arc<dyn RepositoryCreator>,
        publisher: Arc<dyn RepositoryPublisher>,
    ) -> Self {
        Self {
            cloner,
            creator,
            publisher,
        }
    }

    pub async fn run(
        &self,
        project: &ProjectDescriptor,
        deploy: bool,
    ) -> Result<SetupReport, WorkflowError> {
        let name = &project.name;
        info!(project = %name, "Starting repository setup");

        info!("Step 1: Cloning template repository...");
        let project_path = self
            .cloner
            .clone_project(name, &project.destination_root)
            .await
            .map_err(|e| WorkflowError::stage_failed(Stage::Clone, e))?;

        info!("Step 2: Creating GitHub repository...");
        let repository = self
            .creator
            .create_repository(name.as_str(), &project.description)
            .await
            .map_err(|e| WorkflowError::stage_failed(Stage::CreateRemote, e))?;

        info!("Step 3: Pushing code to GitHub...");
        self.publisher
            .publish(&project_path, &repository.clone_url, name.as_str())
            .await
            .map_err(|e| WorkflowError::stage_failed(Stage::Publish, e))?;

        if deploy {
            warn!(stage = ?Stage::Deploy, "Deployment requested but not implemented; skipping");
        }

        info!(project = %name, repository = %repository.web_url(), "Repository setup completed");
        Ok(SetupReport {
            project_name: name.clone(),
            project_path,
            repository,
            template_url: self.cloner.template_url(),
            deploy_requested: deploy,
        })
    }

    /// Run on its own task so that a panic anywhere in the stages surfaces as
    /// [`WorkflowError::Unexpected`] instead of tearing down the caller.
    pub async fn run_isolated(
        self: Arc<Self>,
        project: ProjectDescriptor,
        deploy: bool,
    ) -> Result<SetupReport, WorkflowError> {
        let handle = tokio::spawn(async move { self.run(&project, deploy).await });
        match handle.await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Unexpected error during repository setup");
                Err(WorkflowError::Unexpected(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::provision::ProvisionError;
    use crate::git::publish::PublishError;
    use crate::github::CreateRepositoryError;
    use crate::workflows::stages::{MockRepositoryCreator, MockRepositoryPublisher, MockTemplateCloner};
    use mockall::predicate::eq;
    use std::path::Path;

    fn project() -> ProjectDescriptor {
        ProjectDescriptor::new(ProjectName::parse("p").unwrap(), "", "/tmp")
    }

    fn cloner_ok() -> MockTemplateCloner {
        let mut cloner = MockTemplateCloner::new();
        cloner
            .expect_clone_project()
            .times(1)
            .returning(|_, _| Ok(PathBuf::from("/tmp/p")));
        cloner
            .expect_template_url()
            .returning(|| "https://github.com/test/template".to_string());
        cloner
    }

    fn creator_ok() -> MockRepositoryCreator {
        let mut creator = MockRepositoryCreator::new();
        creator
            .expect_create_repository()
            .with(eq("p"), eq(""))
            .times(1)
            .returning(|_, _| Ok(RemoteRepository::new("https://github.com/user/p.git")));
        creator
    }

    fn workflow(
        cloner: MockTemplateCloner,
        creator: MockRepositoryCreator,
        publisher: MockRepositoryPublisher,
    ) -> SetupWorkflow {
        SetupWorkflow::new(Arc::new(cloner), Arc::new(creator), Arc::new(publisher))
    }

    #[tokio::test]
    async fn test_all_stages_succeed() {
        let mut publisher = MockRepositoryPublisher::new();
        publisher
            .expect_publish()
            .withf(|path, url, name| {
                path == Path::new("/tmp/p") && url == "https://github.com/user/p.git" && name == "p"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let report = workflow(cloner_ok(), creator_ok(), publisher)
            .run(&project(), false)
            .await
            .unwrap();
        let message = report.to_string();

        assert!(message.contains("Repository URL: https://github.com/user/p"));
        assert_eq!(message.lines().filter(|l| l.starts_with("✅")).count(), 3);
        assert!(!message.contains("Amplify"));
    }

    #[tokio::test]
    async fn test_clone_failure_stops_the_workflow() {
        let mut cloner = MockTemplateCloner::new();
        cloner
            .expect_clone_project()
            .times(1)
            .returning(|_, _| Err(ProvisionError::Clone("Clone failed".to_string())));
        let mut creator = MockRepositoryCreator::new();
        creator.expect_create_repository().never();
        let mut publisher = MockRepositoryPublisher::new();
        publisher.expect_publish().never();

        let err = workflow(cloner, creator, publisher)
            .run(&project(), false)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed at Step 1: Failed to clone template repository: Clone failed"
        );
    }

    #[tokio::test]
    async fn test_remote_failure_is_step_two() {
        let mut creator = MockRepositoryCreator::new();
        creator
            .expect_create_repository()
            .returning(|_, _| Err(CreateRepositoryError::RequestFailed));
        let mut publisher = MockRepositoryPublisher::new();
        publisher.expect_publish().never();

        let err = workflow(cloner_ok(), creator, publisher)
            .run(&project(), false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed at Step 2: Failed to create GitHub repository");
    }

    #[tokio::test]
    async fn test_publish_failure_is_step_three() {
        let mut publisher = MockRepositoryPublisher::new();
        publisher
            .expect_publish()
            .returning(|_, _, _| Err(PublishError::Push("rejected".to_string())));

        let err = workflow(cloner_ok(), creator_ok(), publisher)
            .run(&project(), false)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::StageFailed {
                stage: Stage::Publish,
                step: 3,
                detail: "Failed to push to GitHub: rejected".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_deploy_request_annotates_but_never_fails() {
        let mut publisher = MockRepositoryPublisher::new();
        publisher.expect_publish().returning(|_, _, _| Ok(()));

        let report = workflow(cloner_ok(), creator_ok(), publisher)
            .run(&project(), true)
            .await
            .unwrap();

        assert!(report.deploy_requested);
        assert!(report
            .to_string()
            .ends_with("can be added in future updates."));
    }

    #[tokio::test]
    async fn test_panicking_stage_is_unexpected() {
        let mut cloner = MockTemplateCloner::new();
        cloner
            .expect_clone_project()
            .returning(|_, _| panic!("disk vanished"));

        let err = Arc::new(workflow(
            cloner,
            MockRepositoryCreator::new(),
            MockRepositoryPublisher::new(),
        ))
        .run_isolated(project(), false)
        .await
        .unwrap_err();

        assert!(matches!(err, WorkflowError::Unexpected(_)));
        assert!(err
            .to_string()
            .starts_with("Repository setup failed due to unexpected error:"));
    }

    #[test]
    fn test_stage_failure_wraps_detail_verbatim() {
        assert_eq!(
            WorkflowError::stage_failed(Stage::Clone, "Clone failed").to_string(),
            "Failed at Step 1: Clone failed"
        );
        assert_eq!(
            WorkflowError::stage_failed(Stage::Publish, "Failed to push to GitHub: denied").to_string(),
            "Failed at Step 3: Failed to push to GitHub: denied"
        );
    }

    #[tokio::test]
    async fn test_clone_detail_reported_as_given() {
        let mut cloner = MockTemplateCloner::new();
        cloner
            .expect_clone_project()
            .returning(|_, _| Err(ProvisionError::Clone("Clone failed".to_string())));
        let mut creator = MockRepositoryCreator::new();
        creator.expect_create_repository().never();

        let err = workflow(cloner, creator, MockRepositoryPublisher::new())
            .run(&project(), false)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::StageFailed {
                stage: Stage::Clone,
                step: 1,
                detail: ProvisionError::Clone("Clone failed".to_string()).to_string(),
            }
        );
    }

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::Clone.step_number(), Some(1));
        assert_eq!(Stage::CreateRemote.step_number(), Some(2));
        assert_eq!(Stage::Publish.step_number(), Some(3));
        assert_eq!(Stage::Deploy.step_number(), None);
    }
}
