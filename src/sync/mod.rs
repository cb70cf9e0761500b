//! Push/pull synchronization with git-forge repositories.
//!
//! # Module Structure
//!
//! ```text
//! sync/
//! ├── platform     # GitHub / GitLab / Codeberg endpoints and auth schemes
//! ├── connection   # persisted credentials (.vibe/connection.json)
//! ├── client       # the three REST operations per platform
//! └── error        # SyncError taxonomy
//! ```
//!
//! Sync is file-level, not git-level: each push commits the current slot
//! files one by one through the forge's contents API, each pull overwrites
//! local buffers with the remote versions. No history, no merge.

mod client;
mod connection;
mod error;
mod platform;

pub use client::{ForgeClient, RepoMetadata};
pub use connection::Connection;
pub use error::SyncError;
pub use platform::{Platform, parse_repo_url};

use std::path::Path;

use anyhow::Result;

use crate::workspace::{ProjectKind, Session, SessionSnapshot, Slot};

/// Validate a repository URL + token against the remote, then persist the
/// connection record.
///
/// On GitLab the probe resolves the numeric project id. When no branch was
/// given, the remote's default branch wins over the `main` fallback.
pub fn connect(
    root: &Path,
    url: &str,
    token: &str,
    branch: Option<&str>,
) -> Result<Connection> {
    let (platform, owner, repo) = parse_repo_url(url)?;
    let mut connection = Connection {
        platform,
        owner,
        repo,
        branch: branch.unwrap_or("main").to_string(),
        token: token.to_string(),
        project_id: None,
    };

    let metadata = ForgeClient::new(&connection).repo_metadata()?;
    connection.project_id = metadata.project_id;
    if branch.is_none()
        && let Some(default) = metadata.default_branch
    {
        connection.branch = default;
    }

    connection.save(root)?;
    Ok(connection)
}

/// Upload every slot file of the snapshot. Returns the pushed count.
pub fn push(snapshot: &SessionSnapshot, connection: &Connection) -> Result<usize> {
    let client = ForgeClient::new(connection);
    for (slot, text) in &snapshot.slots {
        client.put_file(slot.file_name(), text)?;
        crate::debug!("sync"; "pushed {}", slot.file_name());
    }
    Ok(snapshot.slots.len())
}

/// Download the kind's slot files from the remote.
///
/// A file the remote doesn't have is skipped, not an error; a fresh
/// repository legitimately has none of them yet.
pub fn fetch(kind: ProjectKind, connection: &Connection) -> Result<Vec<(Slot, String)>> {
    let client = ForgeClient::new(connection);
    let mut fetched = Vec::new();
    for &slot in kind.slots() {
        match client.get_file(slot.file_name()) {
            Ok(text) => fetched.push((slot, text)),
            Err(SyncError::NotFound(_)) => {
                crate::debug!("sync"; "{} not on remote, skipped", slot.file_name());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(fetched)
}

/// Write fetched contents into the session and through to the slot files.
/// Returns the slots whose content actually changed.
pub fn apply(session: &mut Session, fetched: Vec<(Slot, String)>) -> Result<Vec<Slot>> {
    let mut changed = Vec::new();
    for (slot, text) in fetched {
        if session.set_text(slot, text) {
            session.save_slot(slot)?;
            changed.push(slot);
        }
    }
    Ok(changed)
}

/// Fetch-and-apply in one step.
///
/// The serve path calls [`fetch`] and [`apply`] separately so no HTTP
/// happens under the session lock; the CLI has no such concern.
pub fn pull(session: &mut Session, connection: &Connection) -> Result<Vec<Slot>> {
    let fetched = fetch(session.kind(), connection)?;
    apply(session, fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_apply_writes_through_and_reports_changes() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path(), "demo", ProjectKind::Web, "").unwrap();

        let fetched = vec![
            (Slot::Markup, "<h1>pulled</h1>".to_string()),
            (Slot::Style, String::new()),
        ];
        let changed = apply(&mut session, fetched).unwrap();

        // The empty style matched the empty buffer, so only markup changed
        assert_eq!(changed, vec![Slot::Markup]);
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<h1>pulled</h1>"
        );
        assert!(!dir.path().join("style.css").exists());
    }

    #[test]
    fn test_apply_identical_content_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path(), "demo", ProjectKind::Web, "").unwrap();
        session.set_text(Slot::Markup, "<p>same</p>");

        let changed = apply(
            &mut session,
            vec![(Slot::Markup, "<p>same</p>".to_string())],
        )
        .unwrap();
        assert!(changed.is_empty());
    }
}
