//! Workspace state: the session, its buffers, and project snapshots.
//!
//! # Layout on disk
//!
//! ```text
//! my-project/
//! ├── vibe.toml      [project] name / kind / description
//! ├── index.html     Slot::Markup   (web)
//! ├── style.css      Slot::Style    (web, react)
//! ├── script.js      Slot::Script   (web)
//! ├── App.jsx        Slot::Component(react)
//! └── main.py        Slot::Python   (python)
//! ```
//!
//! The session is the single mutable owner of buffer text. Both edit paths
//! (editor PUT and external file change) funnel through it, so revision
//! counters and write-through stay consistent.

mod buffer;
mod bundle;
mod kind;
mod slot;

pub use buffer::EditorBuffer;
pub use bundle::{BUNDLE_FORMAT, Bundle};
pub use kind::ProjectKind;
pub use slot::Slot;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::ProjectConfig;

/// Shared handle to the live session.
///
/// Readers (request handlers, the preview actor) take short read locks to
/// copy what they need; only buffer mutation takes the write lock.
pub type SharedSession = Arc<RwLock<Session>>;

/// The live editing state of one project.
pub struct Session {
    root: PathBuf,
    name: String,
    kind: ProjectKind,
    description: String,
    buffers: FxHashMap<Slot, EditorBuffer>,
}

impl Session {
    /// Open a session at `root`, reading each slot file of `kind`.
    ///
    /// Missing files load as empty buffers; the preview treats absent slots
    /// as empty text rather than failing.
    pub fn open(root: &Path, name: &str, kind: ProjectKind, description: &str) -> Result<Self> {
        let mut buffers = FxHashMap::default();
        for &slot in kind.slots() {
            let path = root.join(slot.file_name());
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to read {}", path.display()));
                }
            };
            buffers.insert(slot, EditorBuffer::new(text));
        }
        Ok(Self {
            root: root.to_path_buf(),
            name: name.to_string(),
            kind,
            description: description.to_string(),
            buffers,
        })
    }

    /// Open the session described by the loaded config.
    pub fn load(config: &ProjectConfig) -> Result<Self> {
        Self::open(
            config.get_root(),
            &config.project.name,
            config.project.kind,
            &config.project.description,
        )
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> ProjectKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Text of a slot, empty if the slot is absent.
    pub fn text(&self, slot: Slot) -> &str {
        self.buffers.get(&slot).map_or("", EditorBuffer::text)
    }

    pub fn buffer(&self, slot: Slot) -> Option<&EditorBuffer> {
        self.buffers.get(&slot)
    }

    /// Whether the slot belongs to this project's kind.
    pub fn has_slot(&self, slot: Slot) -> bool {
        self.kind.slots().contains(&slot)
    }

    /// Replace a slot's text. Returns `true` if the content changed.
    ///
    /// Slots outside the project kind are ignored: the session only ever
    /// holds the slots of its kind.
    pub fn set_text(&mut self, slot: Slot, text: impl Into<String>) -> bool {
        match self.buffers.get_mut(&slot) {
            Some(buffer) => buffer.set(text),
            None => false,
        }
    }

    /// Absolute path of a slot's backing file.
    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    /// Write a slot's buffer to its backing file.
    pub fn save_slot(&self, slot: Slot) -> Result<PathBuf> {
        let path = self.slot_path(slot);
        fs::write(&path, self.text(slot))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write every slot to disk.
    pub fn save_all(&self) -> Result<()> {
        for &slot in self.kind.slots() {
            self.save_slot(slot)?;
        }
        Ok(())
    }

    /// Immutable copy of the sources for composing a preview.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            name: self.name.clone(),
            kind: self.kind,
            slots: self
                .kind
                .slots()
                .iter()
                .map(|&s| (s, self.text(s).to_string()))
                .collect(),
        }
    }

    /// Snapshot the session into a portable bundle.
    pub fn to_bundle(&self) -> Bundle {
        let files: BTreeMap<_, _> = self
            .kind
            .slots()
            .iter()
            .map(|&s| (s, self.text(s).to_string()))
            .collect();
        Bundle::new(&self.name, self.kind, &self.description, files)
    }

    /// Replace buffer contents from a bundle. Returns the changed slots.
    ///
    /// Bundle slots that don't belong to this kind are skipped; slots the
    /// bundle doesn't mention keep their current text.
    pub fn apply_bundle(&mut self, bundle: &Bundle) -> Vec<Slot> {
        let mut changed = Vec::new();
        for (&slot, text) in &bundle.files {
            if self.has_slot(slot) && self.set_text(slot, text.clone()) {
                changed.push(slot);
            }
        }
        changed
    }
}

/// Frozen copy of the session sources at one instant.
///
/// Preview composition works from a snapshot so a rebuild never observes a
/// half-applied edit.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub name: String,
    pub kind: ProjectKind,
    pub slots: Vec<(Slot, String)>,
}

impl SessionSnapshot {
    /// Text of a slot, empty if absent from the snapshot.
    pub fn text(&self, slot: Slot) -> &str {
        self.slots
            .iter()
            .find(|(s, _)| *s == slot)
            .map_or("", |(_, t)| t.as_str())
    }
}
