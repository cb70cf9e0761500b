//! REST client for the file endpoints of GitHub, GitLab and Codeberg.
//!
//! Three operations, per the platforms' contents APIs:
//!
//! - `repo_metadata` - probe the repository (and resolve GitLab's project id)
//! - `get_file` - fetch one file's content on a branch
//! - `put_file` - create or update one file with a commit
//!
//! GitHub and Codeberg share the same contents-API shape (Codeberg runs
//! Gitea, which mirrors it); GitLab addresses files through the project id.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;

use super::connection::Connection;
use super::error::SyncError;
use super::platform::Platform;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters beyond controls that must not appear raw in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'%')
    .add(b'?')
    .add(b'#')
    .add(b'&')
    .add(b'+');

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

fn commit_message(path: &str) -> String {
    format!("Update {path} from vibe")
}

/// What the metadata probe learns about the remote repository.
#[derive(Debug)]
pub struct RepoMetadata {
    /// GitLab's numeric project id; absent on GitHub/Codeberg
    pub project_id: Option<u64>,
    /// The remote's default branch, when reported
    pub default_branch: Option<String>,
}

/// One connection's HTTP client.
pub struct ForgeClient<'a> {
    agent: ureq::Agent,
    connection: &'a Connection,
}

impl<'a> ForgeClient<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .user_agent(concat!("vibe/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent, connection }
    }

    // ========================================================================
    // operations
    // ========================================================================

    /// Probe the repository. Validates the token and, on GitLab, resolves
    /// the numeric project id the file endpoints need.
    pub fn repo_metadata(&self) -> Result<RepoMetadata, SyncError> {
        let json = self.get_json(&self.repo_url(), "repository")?;
        Ok(RepoMetadata {
            project_id: json.get("id").and_then(Value::as_u64),
            default_branch: json
                .get("default_branch")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Fetch one file's text content from the connection's branch.
    pub fn get_file(&self, path: &str) -> Result<String, SyncError> {
        let url = format!("{}?ref={}", self.file_url(path)?, self.connection.branch);
        let json = self.get_json(&url, path)?;
        let encoded = json
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::Decode(format!("no content field for {path}")))?;
        decode_base64_content(encoded)
    }

    /// Create or update one file with a single-file commit.
    pub fn put_file(&self, path: &str, content: &str) -> Result<(), SyncError> {
        match self.connection.platform {
            Platform::Gitlab => self.put_file_gitlab(path, content),
            Platform::Github | Platform::Codeberg => self.put_file_contents(path, content),
        }
    }

    /// GitHub/Codeberg: PUT to the contents API, carrying the current blob
    /// sha when the file already exists.
    fn put_file_contents(&self, path: &str, content: &str) -> Result<(), SyncError> {
        let url = self.file_url(path)?;
        let probe = format!("{}?ref={}", url, self.connection.branch);
        let sha = match self.get_json(&probe, path) {
            Ok(json) => json
                .get("sha")
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(SyncError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let mut body = serde_json::json!({
            "message": commit_message(path),
            "content": BASE64.encode(content),
        });
        if let Some(sha) = sha {
            body["sha"] = Value::String(sha);
        }
        self.send_json("PUT", &url, body, path)?;
        Ok(())
    }

    /// GitLab: POST creates, PUT updates; existence decides which.
    fn put_file_gitlab(&self, path: &str, content: &str) -> Result<(), SyncError> {
        let url = self.file_url(path)?;
        let probe = format!("{}?ref={}", url, self.connection.branch);
        let exists = match self.get_json(&probe, path) {
            Ok(_) => true,
            Err(SyncError::NotFound(_)) => false,
            Err(e) => return Err(e),
        };

        let body = serde_json::json!({
            "branch": self.connection.branch,
            "content": content,
            "commit_message": commit_message(path),
            "encoding": "text",
        });
        let method = if exists { "PUT" } else { "POST" };
        self.send_json(method, &url, body, path)?;
        Ok(())
    }

    // ========================================================================
    // url construction
    // ========================================================================

    fn repo_url(&self) -> String {
        let c = self.connection;
        match c.platform {
            Platform::Gitlab => format!(
                "{}/projects/{}",
                c.platform.api_base(),
                encode_segment(&c.slug())
            ),
            Platform::Github | Platform::Codeberg => {
                format!("{}/repos/{}/{}", c.platform.api_base(), c.owner, c.repo)
            }
        }
    }

    fn file_url(&self, path: &str) -> Result<String, SyncError> {
        let c = self.connection;
        match c.platform {
            Platform::Gitlab => {
                let id = c.project_id.ok_or(SyncError::NotConnected)?;
                Ok(format!(
                    "{}/projects/{}/repository/files/{}",
                    c.platform.api_base(),
                    id,
                    encode_segment(path)
                ))
            }
            Platform::Github | Platform::Codeberg => Ok(format!(
                "{}/repos/{}/{}/contents/{}",
                c.platform.api_base(),
                c.owner,
                c.repo,
                path
            )),
        }
    }

    // ========================================================================
    // http plumbing
    // ========================================================================

    fn get_json(&self, url: &str, what: &str) -> Result<Value, SyncError> {
        let request = self.authorize(self.agent.get(url));
        finish(self.connection.platform, what, request.call())
    }

    fn send_json(
        &self,
        method: &str,
        url: &str,
        body: Value,
        what: &str,
    ) -> Result<Value, SyncError> {
        let request = self.authorize(self.agent.request(method, url));
        finish(self.connection.platform, what, request.send_json(body))
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        let c = self.connection;
        let request = request
            .set("Authorization", &c.platform.auth_header(&c.token))
            .set("Content-Type", "application/json");
        match c.platform {
            Platform::Github => request.set("Accept", "application/vnd.github.v3+json"),
            Platform::Codeberg => request.set("Accept", "application/json"),
            Platform::Gitlab => request,
        }
    }
}

/// Map a ureq outcome into the sync error taxonomy.
fn finish(
    platform: Platform,
    what: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<Value, SyncError> {
    match result {
        Ok(response) => response
            .into_json()
            .map_err(|e| SyncError::Decode(e.to_string())),
        Err(ureq::Error::Status(401, _)) => Err(SyncError::AuthRejected(platform)),
        Err(ureq::Error::Status(404, _)) => Err(SyncError::NotFound(what.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            // Forges put the human-readable reason in a "message" field
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            Err(SyncError::Status { status, message })
        }
        Err(ureq::Error::Transport(t)) => Err(SyncError::Transport(t.to_string())),
    }
}

/// Forges wrap base64 payloads at 60 columns; strip whitespace before
/// decoding.
fn decode_base64_content(encoded: &str) -> Result<String, SyncError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| SyncError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SyncError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(platform: Platform, project_id: Option<u64>) -> Connection {
        Connection {
            platform,
            owner: "octo".to_string(),
            repo: "site".to_string(),
            branch: "main".to_string(),
            token: "t0ken".to_string(),
            project_id,
        }
    }

    #[test]
    fn test_repo_urls_per_platform() {
        let github = connection(Platform::Github, None);
        assert_eq!(
            ForgeClient::new(&github).repo_url(),
            "https://api.github.com/repos/octo/site"
        );

        let gitlab = connection(Platform::Gitlab, None);
        assert_eq!(
            ForgeClient::new(&gitlab).repo_url(),
            "https://gitlab.com/api/v4/projects/octo%2Fsite"
        );

        let codeberg = connection(Platform::Codeberg, None);
        assert_eq!(
            ForgeClient::new(&codeberg).repo_url(),
            "https://codeberg.org/api/v1/repos/octo/site"
        );
    }

    #[test]
    fn test_file_urls_per_platform() {
        let github = connection(Platform::Github, None);
        assert_eq!(
            ForgeClient::new(&github).file_url("index.html").unwrap(),
            "https://api.github.com/repos/octo/site/contents/index.html"
        );

        let gitlab = connection(Platform::Gitlab, Some(42));
        assert_eq!(
            ForgeClient::new(&gitlab).file_url("App.jsx").unwrap(),
            "https://gitlab.com/api/v4/projects/42/repository/files/App.jsx"
        );
    }

    #[test]
    fn test_gitlab_file_url_requires_project_id() {
        let gitlab = connection(Platform::Gitlab, None);
        assert!(matches!(
            ForgeClient::new(&gitlab).file_url("main.py"),
            Err(SyncError::NotConnected)
        ));
    }

    #[test]
    fn test_commit_message_names_path() {
        assert_eq!(commit_message("style.css"), "Update style.css from vibe");
    }

    #[test]
    fn test_decode_strips_wrapped_base64() {
        // "hello\nworld" encoded, then wrapped the way the contents API does
        let wrapped = "aGVsbG8K\nd29ybGQ=\n";
        assert_eq!(decode_base64_content(wrapped).unwrap(), "hello\nworld");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_base64_content("!!not base64!!"),
            Err(SyncError::Decode(_))
        ));
        // Valid base64, invalid UTF-8
        let bad_utf8 = BASE64.encode([0xff, 0xfe, 0x00]);
        assert!(matches!(
            decode_base64_content(&bad_utf8),
            Err(SyncError::Decode(_))
        ));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_segment("octo/site"), "octo%2Fsite");
        assert_eq!(encode_segment("plain-name.py"), "plain-name.py");
    }
}
