pub mod setup;
pub mod stages;

pub use setup::{SetupReport, SetupWorkflow, Stage, WorkflowError};
pub use stages::{RepositoryCreator, RepositoryPublisher, TemplateCloner};
