use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "website-generator")]
#[command(about = "Provision website projects from a template and publish them to GitHub")]
#[command(long_about = "Website Generator clones a starter template, creates a GitHub repository \
                       for it and pushes the code. Run without a subcommand to serve the tools \
                       over stdio for an assistant client.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the tools over stdio as newline-delimited JSON-RPC (default)
    Serve,
    /// Clone the template, create a GitHub repository and push the code
    Setup {
        /// Project and repository name
        project_name: String,
        /// Repository description
        #[arg(long, default_value = "", help = "Repository description")]
        description: String,
        /// Request deployment after publishing
        #[arg(long, help = "Request AWS Amplify deployment (not yet implemented)")]
        deploy: bool,
    },
    /// Commit and push all changes in an existing project
    Push {
        /// Name of the project under the base directory
        project_name: String,
    },
    /// Create a file, creating its directory if needed
    CreateFile {
        /// Directory the file is created in
        #[arg(long, help = "Directory the file is created in")]
        path: String,
        /// File name
        #[arg(long, help = "Name of the file to create")]
        name: String,
        /// File content
        #[arg(long, default_value = "", help = "Content written to the file")]
        content: String,
    },
    /// Print the content of a file
    ReadFile {
        path: String,
    },
    /// List the entries of a directory
    ListFiles {
        path: String,
    },
    /// Replace the content of an existing file
    UpdateFile {
        path: String,
        /// New file content
        #[arg(long, help = "Content replacing the current file content")]
        content: String,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets redacted
    Show,
}
