//! WebSocket actor.
//!
//! Manages connections from open editor pages and pushes [`ReloadMessage`]s
//! to them. Every connected editor shows the same preview, so delivery is
//! always broadcast.
//!
//! ```text
//! PreviewActor --[Broadcast]--> WsActor --> all editor pages
//! acceptor     --[AddClient]------^
//! ```

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::preview::{DisplaySurface, HandleStore, RebuildReason, RenderHandle};
use crate::reload::ReloadMessage;

/// WebSocket actor - manages editor connections and broadcasts.
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients (shared for broadcast + read thread)
    clients: Arc<Mutex<Vec<WebSocket<TcpStream>>>>,
}

impl WsActor {
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Run the actor event loop.
    pub async fn run(mut self) {
        // Background thread polls for client disconnects
        let clients_for_reader = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            Self::client_reader_loop(&clients_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Broadcast(reload) => {
                    self.broadcast(Message::Text(reload.to_json().into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.close(None);
                    }
                    break;
                }
            }
        }
    }

    /// Add a new client connection.
    fn add_client(&self, stream: TcpStream) {
        // Keep blocking mode during handshake, switch to non-blocking after
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                // Now set non-blocking for polling reads
                let _ = ws.get_ref().set_nonblocking(true);

                let connected = ReloadMessage::connected();
                if let Err(e) = ws.send(Message::Text(connected.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {}", e);
                    return;
                }

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "client connected (total: {})", clients.len() + 1);
                clients.push(ws);
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Background thread to drain client messages (non-blocking poll).
    ///
    /// Editors don't send anything meaningful upstream; the read keeps the
    /// protocol healthy (ping replies) and detects closed pages.
    fn client_reader_loop(clients: &Arc<Mutex<Vec<WebSocket<TcpStream>>>>) {
        loop {
            std::thread::sleep(std::time::Duration::from_millis(100));

            let mut clients_guard = clients.lock();
            let mut disconnected = Vec::new();

            for (i, client) in clients_guard.iter_mut().enumerate() {
                match client.read() {
                    Ok(Message::Close(_)) => {
                        disconnected.push(i);
                    }
                    Err(tungstenite::Error::Io(ref e))
                        if e.kind() == std::io::ErrorKind::WouldBlock =>
                    {
                        // No data available, continue
                    }
                    Err(_) => {
                        disconnected.push(i);
                    }
                    _ => {}
                }
            }

            for i in disconnected.into_iter().rev() {
                clients_guard.remove(i);
            }
        }
    }

    /// Broadcast a message to all connected clients.
    fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("ws"; "no clients connected");
            return;
        }

        clients.retain_mut(|client| match client.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("ws"; "client disconnected: {}", e);
                false
            }
        });
        crate::debug!("ws"; "broadcast to {} clients", count);
    }
}

// ============================================================================
// display surface
// ============================================================================

/// The production display surface: a preview iframe inside every connected
/// editor page.
///
/// Assigning swaps the store's current pointer, then tells editors to
/// retarget their iframe at the new handle path.
pub struct WsSurface {
    store: Arc<HandleStore>,
    ws_tx: mpsc::Sender<WsMsg>,
}

impl WsSurface {
    pub fn new(store: Arc<HandleStore>, ws_tx: mpsc::Sender<WsMsg>) -> Self {
        Self { store, ws_tx }
    }
}

impl DisplaySurface for WsSurface {
    fn assign(
        &self,
        handle: &Arc<RenderHandle>,
        reason: RebuildReason,
        took_ms: u64,
    ) -> Option<Arc<RenderHandle>> {
        let previous = self.store.assign(handle);
        let reload = ReloadMessage::rebuilt(handle, reason, took_ms);
        // Dropping a notification is fine: the next rebuild renotifies, and
        // editors poll the current handle on reconnect anyway
        if self.ws_tx.try_send(WsMsg::Broadcast(reload)).is_err() {
            crate::debug!("ws"; "reload channel full, browsers not notified");
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_surface_swaps_current_and_notifies() {
        let store = Arc::new(HandleStore::new());
        let (tx, mut rx) = mpsc::channel(8);
        let surface = WsSurface::new(Arc::clone(&store), tx);

        let first = store.publish("<p>one</p>".to_string());
        assert!(surface.assign(&first, RebuildReason::Manual, 3).is_none());
        assert_eq!(store.current().unwrap().serial(), first.serial());

        match rx.recv().await.unwrap() {
            WsMsg::Broadcast(ReloadMessage::Rebuilt { path, reason, took_ms }) => {
                assert_eq!(path, first.url_path());
                assert_eq!(reason, RebuildReason::Manual);
                assert_eq!(took_ms, 3);
            }
            other => panic!("expected rebuilt broadcast, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_surface_returns_superseded_handle() {
        let store = Arc::new(HandleStore::new());
        let (tx, _rx) = mpsc::channel(8);
        let surface = WsSurface::new(Arc::clone(&store), tx);

        let first = store.publish("<p>one</p>".to_string());
        surface.assign(&first, RebuildReason::Manual, 0);
        let second = store.publish("<p>two</p>".to_string());

        let previous = surface.assign(&second, RebuildReason::Edit, 0).unwrap();
        assert_eq!(previous.serial(), first.serial());
        assert_eq!(store.current().unwrap().serial(), second.serial());
    }

    #[tokio::test]
    async fn test_surface_full_channel_still_swaps() {
        let store = Arc::new(HandleStore::new());
        let (tx, _rx) = mpsc::channel(1);
        let surface = WsSurface::new(Arc::clone(&store), tx);

        let first = store.publish("<p>one</p>".to_string());
        let second = store.publish("<p>two</p>".to_string());
        surface.assign(&first, RebuildReason::Manual, 0);
        // Channel capacity 1 and nobody draining: second notify is dropped,
        // but the current pointer still advances
        surface.assign(&second, RebuildReason::Edit, 0);
        assert_eq!(store.current().unwrap().serial(), second.serial());
    }
}
