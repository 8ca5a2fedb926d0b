pub mod client;
pub mod errors;

pub use client::{GitHubForgeClient, HttpMethod};
pub use errors::{CreateRepositoryError, ForgeError};
