use octocrab::Error as OctocrabError;
use std::time::Duration;
use thiserror::Error;

/// Request-level failures. These are logged and collapsed to `None` by
/// [`GitHubForgeClient::request`](super::GitHubForgeClient::request).
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("GitHub Token is missing. Cannot make API request.")]
    TokenNotFound,
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(String),
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Request error: {0}")]
    Request(#[source] OctocrabError),
    #[error("Request timed out after {:.1} seconds", .0.as_secs_f64())]
    Timeout(Duration),
}

impl ForgeError {
    pub(crate) fn from_octocrab(err: OctocrabError) -> Self {
        match err {
            OctocrabError::GitHub { source, .. } => ForgeError::Status {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => ForgeError::Request(other),
        }
    }
}

/// Outcome of repository creation as reported to the workflow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRepositoryError {
    #[error("Failed to create GitHub repository")]
    RequestFailed,
    #[error("Repository created but clone URL not found")]
    MissingCloneUrl,
}
