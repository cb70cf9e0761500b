//! `[preview]` section: rebuild timing knobs.
//!
//! ```toml
//! [preview]
//! debounce_ms = 500   # quiet period before an edit triggers a rebuild
//! release_ms = 1000   # grace period before a superseded preview is dropped
//! feedback_ms = 1000  # how long the editor shows run feedback
//! ```

use serde::{Deserialize, Serialize};

/// Preview rebuild timing configuration.
///
/// All values are milliseconds. `release_ms` keeps the previous preview
/// document retrievable briefly after a swap, so an iframe that is still
/// loading the old URL doesn't hit a dead link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Quiet period after the last edit before rebuilding
    pub debounce_ms: u64,

    /// Grace period before a superseded preview document is released
    pub release_ms: u64,

    /// Duration of the transient "updated" feedback in the editor
    pub feedback_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            release_ms: 1000,
            feedback_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_preview_defaults() {
        let config = PreviewConfig::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.release_ms, 1000);
        assert_eq!(config.feedback_ms, 1000);
    }

    #[test]
    fn test_preview_partial_override() {
        let config = test_parse_config("[preview]\ndebounce_ms = 150");
        assert_eq!(config.preview.debounce_ms, 150);
        // Unspecified fields keep defaults
        assert_eq!(config.preview.release_ms, 1000);
    }

    #[test]
    fn test_preview_zero_debounce_allowed() {
        // Zero means rebuild immediately on every edit
        let config = test_parse_config("[preview]\ndebounce_ms = 0");
        assert_eq!(config.preview.debounce_ms, 0);
    }
}
