//! Persisted sync credentials.
//!
//! Written by `vibe connect` after a successful metadata probe, read by every
//! push/pull. Lives at `.vibe/connection.json` inside the workspace; the token
//! stays on disk next to the project, never in `vibe.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::SyncError;
use super::platform::Platform;

pub const CONNECTION_DIR: &str = ".vibe";
pub const CONNECTION_FILE: &str = "connection.json";

/// A saved link between this workspace and one remote repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub platform: Platform,
    pub owner: String,
    pub repo: String,

    /// Branch pushes and pulls target
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Personal access token
    pub token: String,

    /// GitLab's numeric project id, resolved at connect time; the file
    /// endpoints address projects by id, not by path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Connection {
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONNECTION_DIR).join(CONNECTION_FILE)
    }

    /// Load the saved connection, or `NotConnected` if none exists.
    pub fn load(root: &Path) -> Result<Self, SyncError> {
        let path = Self::path(root);
        let json = fs::read_to_string(&path).map_err(|_| SyncError::NotConnected)?;
        serde_json::from_str(&json)
            .map_err(|e| SyncError::Decode(format!("{}: {}", path.display(), e)))
    }

    /// Persist the connection, creating `.vibe/` if needed.
    pub fn save(&self, root: &Path) -> Result<(), SyncError> {
        let path = Self::path(root);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// `owner/repo` as shown to the user.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Connection {
        Connection {
            platform: Platform::Github,
            owner: "octo".to_string(),
            repo: "site".to_string(),
            branch: "main".to_string(),
            token: "ghp_secret".to_string(),
            project_id: None,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        sample().save(dir.path()).unwrap();

        let loaded = Connection::load(dir.path()).unwrap();
        assert_eq!(loaded.platform, Platform::Github);
        assert_eq!(loaded.slug(), "octo/site");
        assert_eq!(loaded.token, "ghp_secret");

        // Lands in the dot-directory, not the workspace root
        assert!(dir.path().join(".vibe/connection.json").exists());
    }

    #[test]
    fn test_load_missing_is_not_connected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Connection::load(dir.path()),
            Err(SyncError::NotConnected)
        ));
    }

    #[test]
    fn test_branch_defaults_when_absent() {
        let json = r#"{"platform":"gitlab","owner":"o","repo":"r","token":"t","project_id":42}"#;
        let connection: Connection = serde_json::from_str(json).unwrap();
        assert_eq!(connection.branch, "main");
        assert_eq!(connection.project_id, Some(42));
    }

    #[test]
    fn test_project_id_omitted_when_none() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("project_id"));
    }
}
