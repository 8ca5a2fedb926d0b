use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for the website generator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebsiteGeneratorConfig {
    /// GitHub configuration
    pub github: GitHubConfig,
    /// Template repository settings
    pub template: TemplateConfig,
    /// Where projects are provisioned
    pub workspace: WorkspaceConfig,
    /// Local git identity and process limits
    pub git: GitConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// GitHub API token (the GITHUB_TOKEN environment variable takes precedence)
    pub token: Option<String>,
    /// REST API root
    pub api_base: String,
    /// User-Agent sent with every API request
    pub user_agent: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    /// Repository cloned as the starting point of every project
    pub repository_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Directory under which persistent projects are created
    pub base_directory: PathBuf,
    /// Clone into a throwaway directory that is removed once setup finishes
    pub use_temporary_directory: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    pub user_name: String,
    pub user_email: String,
    pub command_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for WebsiteGeneratorConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig {
                token: None, // Read from GITHUB_TOKEN at call time
                api_base: "https://api.github.com".to_string(),
                user_agent: "website-generator-mcp/1.0.0".to_string(),
                request_timeout_secs: 30,
            },
            template: TemplateConfig {
                repository_url: "https://github.com/Jeetanshu18/react-vite".to_string(),
            },
            workspace: WorkspaceConfig {
                base_directory: PathBuf::from("."),
                use_temporary_directory: false,
            },
            git: GitConfig {
                user_name: "Web Developer".to_string(),
                user_email: "web@developer.com".to_string(),
                command_timeout_secs: 60,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl WebsiteGeneratorConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (website-generator.toml)
    /// 3. Environment variables (prefixed with WEBSITE_GENERATOR__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("website-generator.toml").exists() {
            builder = builder.add_source(File::with_name("website-generator"));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEBSITE_GENERATOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    /// Render the effective configuration as TOML with the token masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.github.token.is_some() {
            redacted.github.token = Some("********".to_string());
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.github.request_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.git.command_timeout_secs)
    }
}

/// Source of the repository-access credential, consulted at call time.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    fn github_token(&self) -> Option<String>;
}

/// Reads `GITHUB_TOKEN` from the process environment on every call and falls
/// back to the token from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    configured: Option<String>,
}

impl EnvCredentials {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }
}

impl CredentialProvider for EnvCredentials {
    fn github_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .or_else(|| self.configured.clone())
            .filter(|token| !token.trim().is_empty())
    }
}

/// Fixed credential, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn github_token(&self) -> Option<String> {
        self.0.clone().filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = WebsiteGeneratorConfig::default();
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.command_timeout(), Duration::from_secs(60));
        assert!(!config.workspace.use_temporary_directory);
    }

    #[test]
    fn test_redacted_toml_hides_token() {
        let mut config = WebsiteGeneratorConfig::default();
        config.github.token = Some("ghp_secret".to_string());

        let rendered = config.to_redacted_toml().unwrap();
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("api_base"));
    }

    #[test]
    fn test_static_credentials_treat_blank_as_missing() {
        assert_eq!(StaticCredentials::new("   ").github_token(), None);
        assert_eq!(StaticCredentials::none().github_token(), None);
        assert_eq!(
            StaticCredentials::new("abc").github_token(),
            Some("abc".to_string())
        );
    }
}
