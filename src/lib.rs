// Website Generator Library - template provisioning and GitHub publishing
// This exposes the tool surface and its components for testing and embedding

pub mod cli;
pub mod config;
pub mod external;
pub mod fs;
pub mod git;
pub mod github;
pub mod mcp;
pub mod project;
pub mod telemetry;
pub mod tools;
pub mod workflows;

// Re-export key types for easy access
pub use config::{CredentialProvider, EnvCredentials, StaticCredentials, WebsiteGeneratorConfig};
pub use external::{CommandResult, CommandRunner};
pub use git::{ChangeOutcome, ChangePublisher, GitPublisher, TemplateProvisioner};
pub use github::{CreateRepositoryError, GitHubForgeClient, HttpMethod};
pub use mcp::ToolServer;
pub use project::{ProjectDescriptor, ProjectName, RemoteRepository};
pub use telemetry::{create_tool_span, generate_correlation_id, init_telemetry};
pub use tools::WebsiteGenerator;
pub use workflows::{SetupReport, SetupWorkflow, WorkflowError};
