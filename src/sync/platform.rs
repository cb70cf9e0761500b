//! Supported git-forge platforms and repository URL parsing.

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::SyncError;

/// A git-hosting platform reachable over its REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Gitlab,
    Codeberg,
}

impl Platform {
    /// Base URL of the platform's REST API.
    pub const fn api_base(self) -> &'static str {
        match self {
            Self::Github => "https://api.github.com",
            Self::Gitlab => "https://gitlab.com/api/v4",
            Self::Codeberg => "https://codeberg.org/api/v1",
        }
    }

    /// `Authorization` header value for a personal access token.
    ///
    /// GitLab wants `Bearer`; GitHub and Codeberg use the `token` scheme.
    pub fn auth_header(self, token: &str) -> String {
        match self {
            Self::Gitlab => format!("Bearer {token}"),
            Self::Github | Self::Codeberg => format!("token {token}"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Gitlab => "GitLab",
            Self::Codeberg => "Codeberg",
        }
    }

    fn from_host(host: &str) -> Option<Self> {
        match host.strip_prefix("www.").unwrap_or(host) {
            "github.com" => Some(Self::Github),
            "gitlab.com" => Some(Self::Gitlab),
            "codeberg.org" => Some(Self::Codeberg),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a repository URL into `(platform, owner, repo)`.
///
/// Accepts the browser-bar forms: with or without scheme, with or without a
/// trailing `.git`. Anything past the `owner/repo` segments is ignored.
pub fn parse_repo_url(input: &str) -> Result<(Platform, String, String), SyncError> {
    let invalid = || SyncError::InvalidRepoUrl(input.to_string());

    // "github.com/user/repo" pasted without a scheme still parses
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    let platform = url
        .host_str()
        .and_then(Platform::from_host)
        .ok_or_else(invalid)?;

    let mut segments = url.path_segments().ok_or_else(invalid)?;
    let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let repo = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(invalid)?
        .trim_end_matches(".git");
    if repo.is_empty() {
        return Err(invalid());
    }

    Ok((platform, owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_bases() {
        assert_eq!(Platform::Github.api_base(), "https://api.github.com");
        assert_eq!(Platform::Gitlab.api_base(), "https://gitlab.com/api/v4");
        assert_eq!(Platform::Codeberg.api_base(), "https://codeberg.org/api/v1");
    }

    #[test]
    fn test_auth_header_schemes() {
        assert_eq!(Platform::Github.auth_header("abc"), "token abc");
        assert_eq!(Platform::Gitlab.auth_header("abc"), "Bearer abc");
        assert_eq!(Platform::Codeberg.auth_header("abc"), "token abc");
    }

    #[test]
    fn test_parse_full_url() {
        let (platform, owner, repo) = parse_repo_url("https://github.com/octo/my-site").unwrap();
        assert_eq!(platform, Platform::Github);
        assert_eq!(owner, "octo");
        assert_eq!(repo, "my-site");
    }

    #[test]
    fn test_parse_without_scheme() {
        let (platform, owner, repo) = parse_repo_url("codeberg.org/octo/site").unwrap();
        assert_eq!(platform, Platform::Codeberg);
        assert_eq!(owner, "octo");
        assert_eq!(repo, "site");
    }

    #[test]
    fn test_parse_strips_git_suffix_and_www() {
        let (platform, _, repo) = parse_repo_url("https://www.github.com/octo/site.git").unwrap();
        assert_eq!(platform, Platform::Github);
        assert_eq!(repo, "site");
    }

    #[test]
    fn test_parse_ignores_extra_path() {
        let (_, owner, repo) =
            parse_repo_url("https://gitlab.com/octo/site/-/tree/main").unwrap();
        assert_eq!(owner, "octo");
        assert_eq!(repo, "site");
    }

    #[test]
    fn test_parse_rejects_unknown_host() {
        assert!(matches!(
            parse_repo_url("https://bitbucket.org/octo/site"),
            Err(SyncError::InvalidRepoUrl(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_segments() {
        assert!(parse_repo_url("https://github.com/octo").is_err());
        assert!(parse_repo_url("https://github.com/").is_err());
        assert!(parse_repo_url("not a url at all").is_err());
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Platform::Codeberg).unwrap(),
            "\"codeberg\""
        );
        let parsed: Platform = serde_json::from_str("\"gitlab\"").unwrap();
        assert_eq!(parsed, Platform::Gitlab);
    }
}
