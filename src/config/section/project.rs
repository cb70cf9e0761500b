//! `[project]` section: identity of the playground project.
//!
//! ```toml
//! [project]
//! name = "my-playground"
//! kind = "web"            # web | react | python
//! description = "scratchpad for css experiments"
//! ```

use serde::{Deserialize, Serialize};

use crate::workspace::ProjectKind;

/// Project identity and flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Display name, also used for snapshot file names
    pub name: String,

    /// Project kind: decides which slots exist
    pub kind: ProjectKind,

    /// Free-form description (lands in exported READMEs)
    pub description: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            kind: ProjectKind::default(),
            description: String::new(),
        }
    }
}
