//! The display-surface seam between publishing and showing a preview.
//!
//! The preview actor talks to a [`DisplaySurface`] trait object; the
//! production surface (in the actor layer) swaps the store's current pointer
//! and tells connected editors to retarget their iframe. Tests plug in a
//! recording stub instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::handle::RenderHandle;

/// What triggered a rebuild. Carried through to the reload message so the
/// editor can tell an edit-driven refresh from an external one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuildReason {
    /// An editor buffer changed
    Edit,
    /// A slot file changed on disk
    File,
    /// Explicit run request
    Manual,
    /// Buffers replaced by a sync pull
    Sync,
}

impl RebuildReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::File => "file",
            Self::Manual => "manual",
            Self::Sync => "sync",
        }
    }
}

impl std::fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a freshly published preview becomes visible.
pub trait DisplaySurface: Send + Sync {
    /// Point the surface at `handle`, returning the handle it supersedes.
    ///
    /// The caller owns the superseded handle's retirement; the surface only
    /// swaps and notifies.
    fn assign(
        &self,
        handle: &Arc<RenderHandle>,
        reason: RebuildReason,
        took_ms: u64,
    ) -> Option<Arc<RenderHandle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RebuildReason::Manual).unwrap(),
            "\"manual\""
        );
        assert_eq!(RebuildReason::File.as_str(), "file");
    }
}
