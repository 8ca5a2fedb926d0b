use std::fmt;

/// The only remote URL scheme the publisher accepts.
pub const GITHUB_HTTPS_PREFIX: &str = "https://github.com/";

/// Clone URL with the access token as its userinfo component.
///
/// Built fresh for each push. `Debug` hides the token, and [`redact`](Self::redact)
/// scrubs it from command output before anything is reported.
#[derive(Clone)]
pub struct AuthenticatedRemote {
    url: String,
    token: String,
}

impl AuthenticatedRemote {
    /// `None` when `clone_url` is not a `https://github.com/` URL.
    pub fn from_clone_url(clone_url: &str, token: &str) -> Option<Self> {
        let path = clone_url.strip_prefix(GITHUB_HTTPS_PREFIX)?;
        Some(Self {
            url: format!("https://{token}@github.com/{path}"),
            token: token.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn redact(&self, text: &str) -> String {
        if self.token.is_empty() {
            return text.to_string();
        }
        text.replace(&self.token, "***")
    }
}

impl fmt::Debug for AuthenticatedRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedRemote")
            .field("url", &self.redact(&self.url))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_becomes_userinfo() {
        let remote =
            AuthenticatedRemote::from_clone_url("https://github.com/user/site.git", "tok123").unwrap();
        assert_eq!(remote.as_str(), "https://tok123@github.com/user/site.git");
    }

    #[test]
    fn test_other_schemes_are_rejected() {
        assert!(AuthenticatedRemote::from_clone_url("git@github.com:user/site.git", "t").is_none());
        assert!(AuthenticatedRemote::from_clone_url("https://gitlab.com/user/site.git", "t").is_none());
        assert!(AuthenticatedRemote::from_clone_url("http://github.com/user/site.git", "t").is_none());
    }

    #[test]
    fn test_debug_and_redact_hide_token() {
        let remote =
            AuthenticatedRemote::from_clone_url("https://github.com/user/site.git", "tok123").unwrap();
        assert!(!format!("{remote:?}").contains("tok123"));
        assert_eq!(
            remote.redact("fatal: unable to access 'https://tok123@github.com/'"),
            "fatal: unable to access 'https://***@github.com/'"
        );
    }
}
