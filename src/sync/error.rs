//! Sync error types.

use thiserror::Error;

use super::platform::Platform;

// ============================================================================
// SyncError
// ============================================================================

/// Errors from the git-forge sync layer
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no repository connected. Run 'vibe connect <url>' first")]
    NotConnected,

    #[error("unrecognized repository URL `{0}` (expected github.com, gitlab.com or codeberg.org)")]
    InvalidRepoUrl(String),

    #[error("{0} rejected the access token")]
    AuthRejected(Platform),

    #[error("`{0}` not found on the remote")]
    NotFound(String),

    #[error("remote returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("malformed remote response: {0}")]
    Decode(String),

    #[error("connection file error: {0}")]
    Io(#[from] std::io::Error),
}
