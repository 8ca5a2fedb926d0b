use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use http::Uri;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::errors::{CreateRepositoryError, ForgeError};
use crate::config::{CredentialProvider, GitHubConfig};
use crate::project::RemoteRepository;
use crate::workflows::stages::RepositoryCreator;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "website-generator-mcp/1.0.0";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// Authenticated access to the GitHub REST API.
///
/// The token is looked up on every request, so a missing credential fails the
/// individual call instead of the process. A fresh octocrab client is built per
/// request because the token and timeout may differ between calls.
pub struct GitHubForgeClient {
    credentials: Arc<dyn CredentialProvider>,
    api_base: String,
    user_agent: String,
    timeout: Duration,
}

impl GitHubForgeClient {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            api_base: GITHUB_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_config(config: &GitHubConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::new(credentials)
            .with_api_base(&config.api_base)
            .with_user_agent(&config.user_agent)
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue a request against `endpoint` (e.g. `/user/repos`) using the default timeout.
    ///
    /// Returns the parsed JSON body on a 2xx response and `None` on any failure;
    /// failures are logged, never raised.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Option<Value> {
        self.request_with_timeout(method, endpoint, payload, self.timeout)
            .await
    }

    pub async fn request_with_timeout(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
        timeout: Duration,
    ) -> Option<Value> {
        let url = format!("{}{}", self.api_base, endpoint);
        match self.try_request(method, endpoint, payload, timeout).await {
            Ok(value) => Some(value),
            Err(ForgeError::TokenNotFound) => {
                error!("GitHub Token is missing. Cannot make API request.");
                None
            }
            Err(ForgeError::Status { status, message }) => {
                error!(%method, %url, status, %message, "HTTP error calling GitHub API");
                None
            }
            Err(e @ (ForgeError::Request(_) | ForgeError::Timeout(_))) => {
                error!(%method, %url, error = %e, "Request error calling GitHub API");
                None
            }
            Err(e) => {
                error!(%method, %url, error = %e, "Unexpected error calling GitHub API");
                None
            }
        }
    }

    async fn try_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
        timeout: Duration,
    ) -> Result<Value, ForgeError> {
        let token = self
            .credentials
            .github_token()
            .ok_or(ForgeError::TokenNotFound)?;
        let client = self.build_client(&token)?;

        let call = async {
            let result: octocrab::Result<Value> = match method {
                HttpMethod::Get => client.get(endpoint, None::<&()>).await,
                HttpMethod::Post => client.post(endpoint, payload).await,
                HttpMethod::Put => client.put(endpoint, payload).await,
                HttpMethod::Delete => client.delete(endpoint, None::<&()>).await,
            };
            result
        };

        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| ForgeError::Timeout(timeout))?
            .map_err(ForgeError::from_octocrab)
    }

    /// The default octocrab stack always adds its own `User-Agent`, so the
    /// client is assembled from the bare service with our headers as the only
    /// extra headers. No retry or redirect layers.
    fn build_client(&self, token: &str) -> Result<Octocrab, ForgeError> {
        let base_uri: Uri = self
            .api_base
            .parse()
            .map_err(|e: http::uri::InvalidUri| ForgeError::ClientBuild(e.to_string()))?;
        let headers = request_headers(&self.user_agent, token)?;

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| ForgeError::ClientBuild(e.to_string()))?
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let octocrab = OctocrabBuilder::new_empty()
            .with_service(client)
            .with_layer(&BaseUriLayer::new(base_uri))
            .with_layer(&ExtraHeadersLayer::new(Arc::new(headers)))
            .with_auth(AuthState::None)
            .build()
            .map_err(|e| ForgeError::ClientBuild(e.to_string()))?;
        Ok(octocrab)
    }

    /// Create a public, empty repository owned by the authenticated user.
    pub async fn create_repository(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RemoteRepository, CreateRepositoryError> {
        let payload = repository_payload(name, description);
        let response = self
            .request(HttpMethod::Post, "/user/repos", Some(&payload))
            .await;
        let repository = remote_from_response(response)?;
        info!(repository = %repository.web_url(), "Created GitHub repository");
        Ok(repository)
    }
}

#[async_trait]
impl RepositoryCreator for GitHubForgeClient {
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RemoteRepository, CreateRepositoryError> {
        GitHubForgeClient::create_repository(self, name, description).await
    }
}

/// One value per header: user agent, accept and token authorization.
fn request_headers(
    user_agent: &str,
    token: &str,
) -> Result<Vec<(HeaderName, HeaderValue)>, ForgeError> {
    let value = |raw: String| {
        HeaderValue::from_str(&raw).map_err(|e| ForgeError::ClientBuild(e.to_string()))
    };
    Ok(vec![
        (USER_AGENT, value(user_agent.to_string())?),
        (ACCEPT, value(GITHUB_ACCEPT.to_string())?),
        (AUTHORIZATION, value(format!("token {token}"))?),
    ])
}

/// Body for `POST /user/repos`; a blank description gets a generated one.
pub fn repository_payload(name: &str, description: &str) -> Value {
    let description = if description.is_empty() {
        format!("Website project: {name}")
    } else {
        description.to_string()
    };
    json!({
        "name": name,
        "description": description,
        "private": false,
        "auto_init": false,
    })
}

fn remote_from_response(response: Option<Value>) -> Result<RemoteRepository, CreateRepositoryError> {
    let response = response.ok_or(CreateRepositoryError::RequestFailed)?;
    response
        .get("clone_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(RemoteRepository::new)
        .ok_or(CreateRepositoryError::MissingCloneUrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticCredentials;

    #[test]
    fn test_payload_generates_description() {
        let payload = repository_payload("site", "");
        assert_eq!(payload["description"], "Website project: site");
        assert_eq!(payload["private"], false);
        assert_eq!(payload["auto_init"], false);

        let payload = repository_payload("site", "My site");
        assert_eq!(payload["description"], "My site");
    }

    #[test]
    fn test_clone_url_extraction() {
        let ok = remote_from_response(Some(json!({
            "clone_url": "https://github.com/user/site.git"
        })));
        assert_eq!(ok, Ok(RemoteRepository::new("https://github.com/user/site.git")));

        assert_eq!(
            remote_from_response(Some(json!({"name": "site"}))),
            Err(CreateRepositoryError::MissingCloneUrl)
        );
        assert_eq!(
            remote_from_response(Some(json!({"clone_url": ""}))),
            Err(CreateRepositoryError::MissingCloneUrl)
        );
        assert_eq!(
            remote_from_response(None),
            Err(CreateRepositoryError::RequestFailed)
        );
    }

    #[tokio::test]
    async fn test_missing_token_fails_the_call() {
        let client = GitHubForgeClient::new(Arc::new(StaticCredentials::none()))
            .with_api_base("http://127.0.0.1:9");

        assert!(client.request(HttpMethod::Get, "/user", None).await.is_none());
        assert_eq!(
            client.create_repository("site", "").await,
            Err(CreateRepositoryError::RequestFailed)
        );
    }

    #[test]
    fn test_request_headers_are_unique() {
        let headers = request_headers(DEFAULT_USER_AGENT, "tok").unwrap();
        let names: Vec<_> = headers.iter().map(|(name, _)| name.clone()).collect();

        assert_eq!(names, vec![USER_AGENT, ACCEPT, AUTHORIZATION]);
        assert_eq!(headers[0].1, "website-generator-mcp/1.0.0");
        assert_eq!(headers[2].1, "token tok");
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        assert!(matches!(
            request_headers(DEFAULT_USER_AGENT, "bad\ntoken"),
            Err(ForgeError::ClientBuild(_))
        ));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
