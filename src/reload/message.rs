//! Live reload message protocol.
//!
//! JSON messages sent over the WebSocket between the serve process and open
//! editor pages:
//!
//! - `connected`: handshake acknowledgment with the server version
//! - `rebuilt`: a rebuild published a new preview document; the editor
//!   retargets its preview iframe at `path`
//! - `sync`: buffers were replaced by a sync pull; the editor reloads its
//!   panes from the project API

use serde::{Deserialize, Serialize};

use crate::preview::{RebuildReason, RenderHandle};

/// Message sent to connected editor pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// A rebuild swapped in a new preview document
    Rebuilt {
        /// Handle path to load into the preview iframe
        path: String,
        /// What triggered the rebuild
        reason: RebuildReason,
        /// Compose-and-publish duration
        took_ms: u64,
    },

    /// Buffers changed outside the editor (sync pull)
    Sync,
}

impl ReloadMessage {
    /// Create a connected message.
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Create a rebuilt message pointing at `handle`.
    pub fn rebuilt(handle: &RenderHandle, reason: RebuildReason, took_ms: u64) -> Self {
        Self::Rebuilt {
            path: handle.url_path(),
            reason,
            took_ms,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"sync"}"#.to_string())
    }

    /// Parse from JSON string.
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_carries_version() {
        let json = ReloadMessage::connected().to_json();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_rebuilt_serialization() {
        let msg = ReloadMessage::Rebuilt {
            path: "/preview/7-a1b2c3d4e5f6.html".to_string(),
            reason: RebuildReason::Edit,
            took_ms: 3,
        };
        let json = msg.to_json();
        assert!(json.contains(r#""type":"rebuilt""#));
        assert!(json.contains(r#""reason":"edit""#));
        assert!(json.contains(r#""took_ms":3"#));

        match ReloadMessage::from_json(&json).unwrap() {
            ReloadMessage::Rebuilt { path, reason, .. } => {
                assert_eq!(path, "/preview/7-a1b2c3d4e5f6.html");
                assert_eq!(reason, RebuildReason::Edit);
            }
            other => panic!("expected rebuilt, got {other:?}"),
        }
    }

    #[test]
    fn test_sync_roundtrip() {
        let json = ReloadMessage::Sync.to_json();
        assert_eq!(json, r#"{"type":"sync"}"#);
        assert!(matches!(
            ReloadMessage::from_json(&json),
            Some(ReloadMessage::Sync)
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ReloadMessage::from_json("not json").is_none());
        assert!(ReloadMessage::from_json(r#"{"type":"unknown"}"#).is_none());
    }
}
