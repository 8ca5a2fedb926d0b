//! Project identifiers and the short-lived values passed between workflow stages.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project name is required and cannot be empty.")]
    EmptyProjectName,
}

/// Repository-safe project name: trimmed, spaces replaced by hyphens, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(Self(trimmed.replace(' ', "-").to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Everything the setup workflow needs to know about a new project.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub name: ProjectName,
    pub description: String,
    /// Directory the project directory is created under.
    pub destination_root: PathBuf,
}

impl ProjectDescriptor {
    pub fn new(name: ProjectName, description: impl Into<String>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            name,
            description: description.into(),
            destination_root: destination_root.into(),
        }
    }

    /// `destination_root / name`
    pub fn project_path(&self) -> PathBuf {
        project_path(&self.destination_root, &self.name)
    }
}

pub fn project_path(root: &Path, name: &ProjectName) -> PathBuf {
    root.join(name.as_str())
}

/// Repository created on the forge. Only the clone URL is consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub clone_url: String,
}

impl RemoteRepository {
    pub fn new(clone_url: impl Into<String>) -> Self {
        Self {
            clone_url: clone_url.into(),
        }
    }

    /// Browser URL: the clone URL without its `.git` suffix.
    pub fn web_url(&self) -> &str {
        self.clone_url
            .strip_suffix(".git")
            .unwrap_or(&self.clone_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_sanitization() {
        let name = ProjectName::parse("  My Cool Site ").unwrap();
        assert_eq!(name.as_str(), "my-cool-site");
    }

    #[test]
    fn test_blank_project_name_rejected() {
        assert_eq!(ProjectName::parse(""), Err(ValidationError::EmptyProjectName));
        assert_eq!(ProjectName::parse(" \t\n "), Err(ValidationError::EmptyProjectName));
    }

    #[test]
    fn test_project_path_joins_name() {
        let descriptor = ProjectDescriptor::new(ProjectName::parse("Site").unwrap(), "", "/tmp/work");
        assert_eq!(descriptor.project_path(), PathBuf::from("/tmp/work/site"));
    }

    #[test]
    fn test_web_url_strips_git_suffix() {
        let repo = RemoteRepository::new("https://github.com/user/site.git");
        assert_eq!(repo.web_url(), "https://github.com/user/site");
        assert_eq!(RemoteRepository::new("https://x/y").web_url(), "https://x/y");
    }
}
