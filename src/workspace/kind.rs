//! Project kinds and their slot layouts.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Slot;

/// The flavor of a project: which slots exist and how the preview is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// HTML + CSS + JavaScript, executed live in the preview pane
    #[default]
    Web,
    /// React component + stylesheet, previewed as a highlighted listing
    React,
    /// Single Python script, previewed as a highlighted listing
    Python,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 3] = [ProjectKind::Web, ProjectKind::React, ProjectKind::Python];

    /// Stable identifier used in config files and snapshots.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::React => "react",
            Self::Python => "python",
        }
    }

    /// Slots of this kind, in editor tab order.
    pub const fn slots(self) -> &'static [Slot] {
        match self {
            Self::Web => &[Slot::Markup, Slot::Style, Slot::Script],
            Self::React => &[Slot::Component, Slot::Style],
            Self::Python => &[Slot::Python],
        }
    }

    /// Whether the preview executes the sources (vs. a source listing).
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Web)
    }

    /// Parse from the stable identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Seed content for a freshly created slot file.
    pub fn seed_content(self, slot: Slot) -> &'static str {
        crate::embed::seed::content(self, slot)
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
