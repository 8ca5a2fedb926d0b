//! File tools for working inside a provisioned project
//!
//! Every operation validates its string inputs before touching the file
//! system and reports failures as [`FileError`], whose `Display` output is
//! the message handed back to the tool caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use website_generator::fs::ProjectFiles;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let files = ProjectFiles::new();
//!     files.create_file("my-site/src", "Hero.jsx", "export default () => null;").await?;
//!     println!("{}", files.read_file("my-site/src/Hero.jsx").await?);
//!     Ok(())
//! }
//! ```
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File path is required and cannot be empty.")]
    EmptyFilePath,
    #[error("File name is required and cannot be empty.")]
    EmptyFileName,
    #[error("Directory path is required and cannot be empty.")]
    EmptyDirectoryPath,
    #[error("File '{0}' does not exist.")]
    FileNotFound(String),
    #[error("File '{0}' does not exist. Use new_file to create a new file.")]
    UpdateTargetMissing(String),
    #[error("Path '{0}' is not a file.")]
    NotAFile(String),
    #[error("Directory '{0}' does not exist.")]
    DirectoryNotFound(String),
    #[error("Path '{0}' is not a directory.")]
    NotADirectory(String),
    #[error("Permission denied when reading file: {0}")]
    ReadPermissionDenied(String),
    #[error("Unable to decode file as UTF-8: {0}")]
    NotUtf8(String),
    #[error("Error reading file '{path}': {message}")]
    Read { path: String, message: String },
    #[error("Permission denied when listing directory: {0}")]
    ListPermissionDenied(String),
    #[error("Error listing directory '{path}': {message}")]
    List { path: String, message: String },
    #[error("Permission denied when updating file: {0}")]
    UpdatePermissionDenied(String),
    #[error("Error updating file '{path}': {message}")]
    Update { path: String, message: String },
    #[error("Failed to create file '{name}' at '{directory}': {message}")]
    Create {
        name: String,
        directory: String,
        message: String,
    },
}

/// Stateless handle over the project file operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFiles;

impl ProjectFiles {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `directory/file_name`, creating `directory` if needed.
    pub async fn create_file(
        &self,
        directory: &str,
        file_name: &str,
        content: &str,
    ) -> Result<String, FileError> {
        if file_name.trim().is_empty() {
            return Err(FileError::EmptyFileName);
        }
        if directory.trim().is_empty() {
            return Err(FileError::EmptyFilePath);
        }

        let create_error = |e: std::io::Error| FileError::Create {
            name: file_name.to_string(),
            directory: directory.to_string(),
            message: e.to_string(),
        };

        let dir = Path::new(directory);
        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| log_err(create_error(e)))?;
            info!(directory, "Created directory");
        }

        let full_path = dir.join(file_name);
        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| log_err(create_error(e)))?;

        info!(path = %full_path.display(), "Successfully created file");
        Ok(format!(
            "File '{file_name}' created successfully at '{directory}'"
        ))
    }

    pub async fn read_file(&self, file_path: &str) -> Result<String, FileError> {
        let path = file_path.trim();
        if path.is_empty() {
            return Err(FileError::EmptyFilePath);
        }
        let target = Path::new(path);
        if !target.exists() {
            return Err(FileError::FileNotFound(path.to_string()));
        }
        if !target.is_file() {
            return Err(FileError::NotAFile(path.to_string()));
        }

        let content = tokio::fs::read_to_string(target).await.map_err(|e| {
            log_err(match e.kind() {
                ErrorKind::PermissionDenied => FileError::ReadPermissionDenied(path.to_string()),
                ErrorKind::InvalidData => FileError::NotUtf8(path.to_string()),
                _ => FileError::Read {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            })
        })?;

        info!(path, "Successfully read file");
        Ok(content)
    }

    /// Entries of `directory_path` as `[DIR] name` / `[FILE] name`, sorted.
    pub async fn list_files(&self, directory_path: &str) -> Result<Vec<String>, FileError> {
        let path = directory_path.trim();
        if path.is_empty() {
            return Err(FileError::EmptyDirectoryPath);
        }
        let target = Path::new(path);
        if !target.exists() {
            return Err(FileError::DirectoryNotFound(path.to_string()));
        }
        if !target.is_dir() {
            return Err(FileError::NotADirectory(path.to_string()));
        }

        let list_error = |e: std::io::Error| {
            log_err(match e.kind() {
                ErrorKind::PermissionDenied => FileError::ListPermissionDenied(path.to_string()),
                _ => FileError::List {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            })
        };

        let mut entries = tokio::fs::read_dir(target).await.map_err(list_error)?;
        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().is_dir() {
                items.push(format!("[DIR] {name}"));
            } else {
                items.push(format!("[FILE] {name}"));
            }
        }
        items.sort();

        info!(path, count = items.len(), "Successfully listed directory");
        Ok(items)
    }

    /// Replace the contents of an existing file.
    pub async fn update_file(&self, file_path: &str, new_content: &str) -> Result<String, FileError> {
        let path = file_path.trim();
        if path.is_empty() {
            return Err(FileError::EmptyFilePath);
        }
        let target = Path::new(path);
        if !target.exists() {
            return Err(FileError::UpdateTargetMissing(path.to_string()));
        }
        if !target.is_file() {
            return Err(FileError::NotAFile(path.to_string()));
        }

        tokio::fs::write(target, new_content).await.map_err(|e| {
            log_err(match e.kind() {
                ErrorKind::PermissionDenied => FileError::UpdatePermissionDenied(path.to_string()),
                _ => FileError::Update {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            })
        })?;

        let message = format!("Successfully updated file: {path}");
        info!(path, "Successfully updated file");
        Ok(message)
    }
}

fn log_err(err: FileError) -> FileError {
    error!(error = %err, "File operation failed");
    err
}
