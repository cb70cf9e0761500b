//! Editor slots - the named panes of a project.

use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// A named editor pane backed by one file in the project root.
///
/// Slots are the unit of editing, rebuilding and syncing: the editor PUTs
/// text into a slot, the file watcher maps changed files back to slots, and
/// push/pull walk the slots of the current project kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// HTML page body (web projects)
    Markup,
    /// Stylesheet (web and react projects)
    Style,
    /// Page script (web projects)
    Script,
    /// React root component (react projects)
    Component,
    /// Python source (python projects)
    Python,
}

impl Slot {
    /// All slots, in canonical order.
    pub const ALL: [Slot; 5] = [
        Slot::Markup,
        Slot::Style,
        Slot::Script,
        Slot::Component,
        Slot::Python,
    ];

    /// Stable identifier used in URLs and snapshot files.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Style => "style",
            Self::Script => "script",
            Self::Component => "component",
            Self::Python => "python",
        }
    }

    /// On-disk file name within the project root.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markup => "index.html",
            Self::Style => "style.css",
            Self::Script => "script.js",
            Self::Component => "App.jsx",
            Self::Python => "main.py",
        }
    }

    /// Human-readable tab label in the editor.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Style => "CSS",
            Self::Script => "JavaScript",
            Self::Component => "App.jsx",
            Self::Python => "main.py",
        }
    }

    /// Language used for highlighting, snippets and formatting.
    pub const fn language(self) -> Language {
        match self {
            Self::Markup => Language::Html,
            Self::Style => Language::Css,
            Self::Script | Self::Component => Language::JavaScript,
            Self::Python => Language::Python,
        }
    }

    /// Parse from the stable identifier (`markup`, `style`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Map an on-disk file name back to its slot.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.file_name() == name)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_id(slot.id()), Some(slot));
        }
        assert_eq!(Slot::from_id("banana"), None);
    }

    #[test]
    fn test_slot_file_name_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_file_name(slot.file_name()), Some(slot));
        }
        assert_eq!(Slot::from_file_name("index.htm"), None);
    }

    #[test]
    fn test_slot_serde_lowercase() {
        let json = serde_json::to_string(&Slot::Markup).unwrap();
        assert_eq!(json, "\"markup\"");
        let slot: Slot = serde_json::from_str("\"component\"").unwrap();
        assert_eq!(slot, Slot::Component);
    }

    #[test]
    fn test_slot_languages() {
        assert_eq!(Slot::Markup.language(), Language::Html);
        assert_eq!(Slot::Component.language(), Language::JavaScript);
        assert_eq!(Slot::Python.language(), Language::Python);
    }
}
