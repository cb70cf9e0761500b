//! Filesystem actor.
//!
//! Watches the project root for slot-file changes made outside the editor
//! (an external editor, a git checkout) and feeds them into the session and
//! the preview actor. A buffer write from the editor itself also touches the
//! slot file; those echoes are suppressed by content comparison, so only
//! real external changes trigger a rebuild.
//!
//! ```text
//! notify (sync) → bridge thread → async channel → session update → PreviewMsg
//! ```

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::PreviewMsg;
use crate::workspace::{SharedSession, Slot};

/// Filesystem actor - watches the project root.
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    session: SharedSession,
    preview_tx: mpsc::Sender<PreviewMsg>,
}

impl FsActor {
    /// Create the actor and start watching immediately.
    ///
    /// Events buffer in the channel while the caller finishes startup, so
    /// changes made during the first build are not lost.
    pub fn new(
        session: SharedSession,
        preview_tx: mpsc::Sender<PreviewMsg>,
    ) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // Slot files and vibe.toml all live directly in the root
        let root = session.read().root().to_path_buf();
        watcher.watch(&root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            session,
            preview_tx,
        })
    }

    /// Run the actor event loop.
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let _watcher = self.watcher;
        let session = self.session;
        let preview_tx = self.preview_tx;

        let config_name = config_file_name();

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Bridge thread: notify's callback is sync, the actor is async
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        while let Some(event) = async_rx.recv().await {
            if !crate::core::is_serving() || !is_relevant(&event.kind) {
                continue;
            }
            for path in &event.paths {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if is_temp_file(name) {
                    continue;
                }

                if name == config_name {
                    reload_config();
                    continue;
                }

                let Some(slot) = Slot::from_file_name(name) else {
                    continue;
                };
                if apply_external_change(&session, slot, path)
                    && preview_tx.send(PreviewMsg::FileChanged { slot }).await.is_err()
                {
                    return; // Preview actor gone
                }
            }
        }
    }
}

/// Creation and data modification matter; removals don't (the buffer keeps
/// its last contents and the next save recreates the file).
fn is_relevant(kind: &notify::EventKind) -> bool {
    use notify::EventKind;
    match kind {
        EventKind::Create(_) => true,
        // Metadata-only changes (mtime/chmod noise) would loop forever
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    }
}

/// Editor artifacts (vim swap files, backups, dotfiles).
fn is_temp_file(name: &str) -> bool {
    let ext = name.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    matches!(ext, "swp" | "swo" | "tmp" | "bak" | "bck" | "backup")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Load the changed file into its buffer. Returns `false` when the disk
/// content matches the buffer, which is the echo of our own write-through.
fn apply_external_change(session: &SharedSession, slot: Slot, path: &std::path::Path) -> bool {
    let disk = std::fs::read_to_string(path).unwrap_or_default();
    let changed = {
        let mut session = session.write();
        session.has_slot(slot) && session.set_text(slot, disk)
    };
    if changed {
        crate::debug!("watch"; "external change: {}", slot.file_name());
    }
    changed
}

fn config_file_name() -> String {
    crate::config::cfg()
        .config_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("vibe.toml")
        .to_string()
}

fn reload_config() {
    match crate::config::reload_config() {
        Ok(true) => crate::log!("watch"; "config reloaded"),
        Ok(false) => {}
        Err(e) => crate::log!("error"; "config reload failed: {}", e),
    }
}
