use anyhow::Result;

use crate::tools::WebsiteGenerator;

/// One-shot invocation of a single tool; the status text goes to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    Setup {
        project_name: String,
        description: String,
        deploy: bool,
    },
    Push {
        project_name: String,
    },
    CreateFile {
        directory: String,
        file_name: String,
        content: String,
    },
    ReadFile {
        path: String,
    },
    ListFiles {
        path: String,
    },
    UpdateFile {
        path: String,
        content: String,
    },
}

impl ToolCommand {
    pub async fn output(&self, tools: &WebsiteGenerator) -> String {
        match self {
            ToolCommand::Setup {
                project_name,
                description,
                deploy,
            } => tools.repo_setup(project_name, description, *deploy).await,
            ToolCommand::Push { project_name } => tools.push_changes(project_name).await,
            ToolCommand::CreateFile {
                directory,
                file_name,
                content,
            } => tools.create_file(file_name, directory, content).await,
            ToolCommand::ReadFile { path } => tools.read_file(path).await,
            ToolCommand::ListFiles { path } => tools.list_files(path).await,
            ToolCommand::UpdateFile { path, content } => tools.update_file(path, content).await,
        }
    }

    pub async fn execute(&self, tools: &WebsiteGenerator) -> Result<()> {
        println!("{}", self.output(tools).await);
        Ok(())
    }
}
