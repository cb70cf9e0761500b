//! Preview actor: the debounced rebuild-and-swap loop.
//!
//! All rebuild scheduling and handle bookkeeping happens on this actor's
//! task, which serializes rebuilds without locks: edits arrive as messages,
//! the debounce timer fires here, and every publish/assign/release runs in
//! message order. The only write others see is the store's current-handle
//! pointer swap.

mod scheduler;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use scheduler::RebuildScheduler;

use super::messages::{PreviewMsg, WsMsg};
use crate::preview::{self, DisplaySurface, HandleStore, RebuildReason};
use crate::reload::ReloadMessage;
use crate::workspace::SharedSession;

/// Preview actor - owns the debounce state and the rebuild pipeline.
pub struct PreviewActor {
    rx: mpsc::Receiver<PreviewMsg>,
    session: SharedSession,
    store: Arc<HandleStore>,
    surface: Arc<dyn DisplaySurface>,
    ws_tx: mpsc::Sender<WsMsg>,
    scheduler: RebuildScheduler,
    release_delay: Duration,
}

impl PreviewActor {
    /// Create with timing from the loaded config.
    pub fn new(
        rx: mpsc::Receiver<PreviewMsg>,
        session: SharedSession,
        store: Arc<HandleStore>,
        surface: Arc<dyn DisplaySurface>,
        ws_tx: mpsc::Sender<WsMsg>,
    ) -> Self {
        let config = crate::config::cfg();
        Self::with_timing(
            rx,
            session,
            store,
            surface,
            ws_tx,
            config.preview.debounce_ms,
            config.preview.release_ms,
        )
    }

    /// Create with explicit timing (tests use short intervals).
    pub fn with_timing(
        rx: mpsc::Receiver<PreviewMsg>,
        session: SharedSession,
        store: Arc<HandleStore>,
        surface: Arc<dyn DisplaySurface>,
        ws_tx: mpsc::Sender<WsMsg>,
        debounce_ms: u64,
        release_ms: u64,
    ) -> Self {
        Self {
            rx,
            session,
            store,
            surface,
            ws_tx,
            scheduler: RebuildScheduler::new(debounce_ms),
            release_delay: Duration::from_millis(release_ms),
        }
    }

    /// Run the actor event loop.
    pub async fn run(mut self) {
        // First build, so the editor has a document before the first edit.
        self.rebuild_now(RebuildReason::Manual);

        loop {
            tokio::select! {
                biased;
                msg = self.rx.recv() => {
                    match msg {
                        Some(PreviewMsg::Edited { slot }) => {
                            crate::debug!("preview"; "edit: {}", slot);
                            self.scheduler.request(RebuildReason::Edit);
                        }
                        Some(PreviewMsg::FileChanged { slot }) => {
                            crate::debug!("preview"; "file change: {}", slot);
                            self.scheduler.request(RebuildReason::File);
                        }
                        Some(PreviewMsg::RunNow) => {
                            self.scheduler.clear();
                            self.rebuild_now(RebuildReason::Manual);
                        }
                        Some(PreviewMsg::Synced) => {
                            // Editors reload their panes before the preview swaps
                            let _ = self.ws_tx.send(WsMsg::Broadcast(ReloadMessage::Sync)).await;
                            self.scheduler.clear();
                            self.rebuild_now(RebuildReason::Sync);
                        }
                        Some(PreviewMsg::Shutdown) | None => break,
                    }
                }
                _ = tokio::time::sleep(self.scheduler.sleep_duration()) => {
                    if let Some(reason) = self.scheduler.take_if_ready() {
                        self.rebuild_now(reason);
                    }
                }
            }
        }
        crate::debug!("preview"; "shutting down");
    }

    /// Snapshot, compose, publish, assign. The superseded handle is retired
    /// by a spawned delay task after the grace period, never immediately.
    fn rebuild_now(&self, reason: RebuildReason) {
        let started = Instant::now();
        let snapshot = self.session.read().snapshot();
        let doc = preview::compose(&snapshot);
        let handle = self.store.publish(doc);
        let took_ms = started.elapsed().as_millis() as u64;

        let previous = self.surface.assign(&handle, reason, took_ms);
        let unchanged = previous
            .as_ref()
            .is_some_and(|p| p.html() == handle.html());
        if let Some(previous) = previous {
            let store = Arc::clone(&self.store);
            let delay = self.release_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                store.release(&previous);
            });
        }

        if unchanged {
            crate::logger::status_unchanged(&format!("#{} unchanged", handle.serial()));
        } else {
            crate::logger::status_success(&format!(
                "rebuilt #{} in {}ms ({})",
                handle.serial(),
                took_ms,
                reason
            ));
        }
    }
}
