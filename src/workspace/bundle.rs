//! Project snapshots - a single JSON file holding every slot.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::{ProjectKind, Slot};
use crate::utils::date::DateTimeUtc;

/// Snapshot format marker accepted by `unpack`.
pub const BUNDLE_FORMAT: &str = "vibe/1";

/// A self-contained project snapshot: metadata plus every slot's text.
///
/// Written by `vibe pack`, read back by `vibe unpack`. The format marker
/// lets unpack reject files that merely happen to be JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    /// Format marker, always `vibe/1`
    pub format: String,
    pub name: String,
    pub kind: ProjectKind,
    #[serde(default)]
    pub description: String,
    /// Slot id -> slot text
    pub files: BTreeMap<Slot, String>,
    /// RFC 3339 creation timestamp
    pub saved_at: String,
    /// Version of the tool that wrote the snapshot
    pub version: String,
}

impl Bundle {
    /// Create a snapshot from slot contents, stamped with the current time.
    pub fn new(
        name: &str,
        kind: ProjectKind,
        description: &str,
        files: BTreeMap<Slot, String>,
    ) -> Self {
        Self {
            format: BUNDLE_FORMAT.to_string(),
            name: name.to_string(),
            kind,
            description: description.to_string(),
            files,
            saved_at: DateTimeUtc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Parse and validate a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: Self = serde_json::from_str(json).context("invalid snapshot JSON")?;
        if bundle.format != BUNDLE_FORMAT {
            bail!(
                "unsupported snapshot format `{}` (expected `{BUNDLE_FORMAT}`)",
                bundle.format
            );
        }
        Ok(bundle)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize snapshot")
    }

    /// Default snapshot file name: project name sanitized to `[A-Za-z0-9_]`.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{safe}.vibe.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bundle {
        let mut files = BTreeMap::new();
        files.insert(Slot::Markup, "<h1>Hi</h1>".to_string());
        files.insert(Slot::Style, "h1 { color: red; }".to_string());
        files.insert(Slot::Script, String::new());
        Bundle::new("My Playground", ProjectKind::Web, "demo", files)
    }

    #[test]
    fn test_json_roundtrip() {
        let bundle = sample();
        let json = bundle.to_json().unwrap();
        let parsed = Bundle::from_json(&json).unwrap();

        assert_eq!(parsed.name, "My Playground");
        assert_eq!(parsed.kind, ProjectKind::Web);
        assert_eq!(parsed.files[&Slot::Markup], "<h1>Hi</h1>");
        assert_eq!(parsed.files.len(), 3);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let mut bundle = sample();
        bundle.format = "vibe/99".to_string();
        let json = bundle.to_json().unwrap();
        assert!(Bundle::from_json(&json).is_err());
    }

    #[test]
    fn test_rejects_non_snapshot_json() {
        assert!(Bundle::from_json("{\"hello\": 1}").is_err());
        assert!(Bundle::from_json("not json at all").is_err());
    }

    #[test]
    fn test_file_name_sanitized() {
        let bundle = sample();
        assert_eq!(bundle.file_name(), "My_Playground.vibe.json");
    }

    #[test]
    fn test_files_keyed_by_slot_id() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"markup\""));
        assert!(json.contains("\"style\""));
        assert!(json.contains("\"format\": \"vibe/1\""));
    }
}
