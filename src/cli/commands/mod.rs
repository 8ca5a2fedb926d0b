use anyhow::Result;
use std::sync::Arc;

use super::{Commands, ConfigCommands};
use crate::config::{EnvCredentials, WebsiteGeneratorConfig};
use crate::mcp::ToolServer;
use crate::tools::WebsiteGenerator;

pub mod config;
pub mod tool;

pub use tool::ToolCommand;

/// Run the selected subcommand; `None` serves over stdio.
pub async fn run(command: Option<Commands>, config: WebsiteGeneratorConfig) -> Result<()> {
    match command {
        None | Some(Commands::Serve) => serve(&config).await,
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => config::show(&config),
        Some(Commands::Setup {
            project_name,
            description,
            deploy,
        }) => {
            ToolCommand::Setup {
                project_name,
                description,
                deploy,
            }
            .execute(&generator(&config))
            .await
        }
        Some(Commands::Push { project_name }) => {
            ToolCommand::Push { project_name }.execute(&generator(&config)).await
        }
        Some(Commands::CreateFile {
            path,
            name,
            content,
        }) => {
            ToolCommand::CreateFile {
                directory: path,
                file_name: name,
                content,
            }
            .execute(&generator(&config))
            .await
        }
        Some(Commands::ReadFile { path }) => {
            ToolCommand::ReadFile { path }.execute(&generator(&config)).await
        }
        Some(Commands::ListFiles { path }) => {
            ToolCommand::ListFiles { path }.execute(&generator(&config)).await
        }
        Some(Commands::UpdateFile { path, content }) => {
            ToolCommand::UpdateFile { path, content }
                .execute(&generator(&config))
                .await
        }
    }
}

fn generator(config: &WebsiteGeneratorConfig) -> WebsiteGenerator {
    let credentials = Arc::new(EnvCredentials::new(config.github.token.clone()));
    WebsiteGenerator::from_config(config, credentials)
}

async fn serve(config: &WebsiteGeneratorConfig) -> Result<()> {
    ToolServer::new(Arc::new(generator(config))).serve_stdio().await
}
