//! Server lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use crossbeam::channel::Receiver;
use tiny_http::Server;
use tokio::sync::mpsc;

use crate::actor::{Coordinator, PreviewMsg};
use crate::log;
use crate::preview::HandleStore;
use crate::workspace::SharedSession;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Report the address the OS actually bound (port 0 means "any")
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Spawn the actor system on its own tokio runtime.
///
/// Returns the runtime thread handle plus a sender into the preview actor,
/// which the API layer uses to feed edits and run requests into the pipeline.
pub fn spawn_actors(
    session: SharedSession,
    store: Arc<HandleStore>,
    ws_port: u16,
    shutdown_rx: Receiver<()>,
) -> (JoinHandle<()>, mpsc::Sender<PreviewMsg>) {
    let coordinator = Coordinator::new(session, store)
        .with_ws_port(ws_port)
        .with_shutdown_signal(shutdown_rx);
    let preview_tx = coordinator.preview_sender();

    let handle = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        rt.block_on(async {
            if let Err(e) = coordinator.run().await {
                log!("actor"; "error: {}", e);
            }
        });
    });

    (handle, preview_tx)
}

/// Wait for the actor system to shut down gracefully (max 2 seconds).
pub fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_bind_with_retry_skips_taken_port() {
        let interface = IpAddr::V4(Ipv4Addr::LOCALHOST);

        // Port 0 asks the OS for a free port
        let (_first, first_addr) = bind_with_retry(interface, 0).unwrap();
        let taken = first_addr.port();
        assert_ne!(taken, 0);

        // Binding the taken port must fall forward to a neighbor
        let (_second, second_addr) = bind_with_retry(interface, taken).unwrap();
        assert_ne!(second_addr.port(), taken);
    }
}
