//! Actor coordinator - wires up the rebuild pipeline.
//!
//! The coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Wires up actors
//! - Runs them concurrently

use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::{PreviewMsg, WsMsg};
use super::preview::PreviewActor;
use super::ws::{WsActor, WsSurface};
use crate::preview::HandleStore;
use crate::workspace::SharedSession;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    session: SharedSession,
    store: Arc<HandleStore>,
    preview_tx: mpsc::Sender<PreviewMsg>,
    preview_rx: mpsc::Receiver<PreviewMsg>,
    ws_port: Option<u16>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(session: SharedSession, store: Arc<HandleStore>) -> Self {
        // The preview channel exists from construction so the HTTP layer can
        // take a sender before the actors start
        let (preview_tx, preview_rx) = mpsc::channel(CHANNEL_BUFFER);
        Self {
            session,
            store,
            preview_tx,
            preview_rx,
            ws_port: None,
            shutdown_rx: None,
        }
    }

    /// Set WebSocket port.
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Sender for feeding edits and run requests into the pipeline.
    pub fn preview_sender(&self) -> mpsc::Sender<PreviewMsg> {
        self.preview_tx.clone()
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        if let Some(port) = self.ws_port {
            match crate::reload::server::start_ws_server(port, ws_tx.clone()) {
                Ok(actual_port) => {
                    crate::cli::serve::set_actual_ws_port(actual_port);
                }
                Err(e) => {
                    crate::log!("actor"; "websocket server failed: {}", e);
                }
            }
        }

        let fs_actor = if crate::config::cfg().serve.watch {
            let actor = FsActor::new(self.session.clone(), self.preview_tx.clone())
                .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;
            Some(actor)
        } else {
            None
        };

        let surface = Arc::new(WsSurface::new(Arc::clone(&self.store), ws_tx.clone()));
        let preview_actor = PreviewActor::new(
            self.preview_rx,
            self.session,
            self.store,
            surface,
            ws_tx.clone(),
        );
        let ws_actor = WsActor::new(ws_rx);

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        run_actors(
            fs_actor,
            preview_actor,
            ws_actor,
            self.preview_tx,
            ws_tx,
            shutdown_rx,
        )
        .await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}

/// Run all actors concurrently until shutdown.
async fn run_actors(
    fs: Option<FsActor>,
    preview: PreviewActor,
    ws: WsActor,
    preview_tx: mpsc::Sender<PreviewMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let preview_handle = tokio::spawn(async move { preview.run().await });
    let ws_handle = tokio::spawn(async move { ws.run().await });
    let fs_handle = fs.map(|fs| tokio::spawn(async move { fs.run().await }));

    if let Some(rx) = shutdown_rx {
        loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    } else {
        // Without a shutdown channel, run until an actor exits
        match fs_handle {
            Some(fs_handle) => {
                tokio::select! {
                    _ = fs_handle => {}
                    _ = ws_handle => {}
                }
            }
            None => {
                let _ = ws_handle.await;
            }
        }
    }

    crate::debug!("actor"; "sending shutdown to actors");
    let _ = preview_tx.send(PreviewMsg::Shutdown).await;
    let _ = ws_tx.send(WsMsg::Shutdown).await;

    // Bounded wait: the preview actor finishes its in-flight rebuild first
    let _ = tokio::time::timeout(std::time::Duration::from_millis(500), preview_handle).await;
}
