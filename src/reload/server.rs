//! WebSocket listener for editor reload connections.
//!
//! Accepts raw TCP connections and hands them to the WsActor over its
//! channel; the actor performs the WebSocket handshake and owns the client
//! from then on.

use std::net::TcpListener;

use anyhow::Result;

use crate::actor::messages::WsMsg;

/// How many consecutive ports to try past the configured one.
const MAX_PORT_RETRIES: u16 = 10;

/// Start the reload listener. Returns the port actually bound.
///
/// If `base_port` is taken (another vibe instance, usually) the next ports
/// are tried in order; the editor shell is told the real port at render time.
pub fn start_ws_server(base_port: u16, ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Result<u16> {
    let (listener, port) = try_bind_port(base_port, MAX_PORT_RETRIES)?;
    listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        loop {
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("reload"; "editor connected: {}", addr);
                    // Handshake runs blocking inside the actor
                    let _ = stream.set_nonblocking(false);
                    if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                        // Actor is gone; stop accepting
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Err(e) => {
                    crate::log!("reload"; "accept error: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    Ok(port)
}

/// Bind `base_port`, falling back to the following ports when taken.
fn try_bind_port(base_port: u16, max_retries: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(format!("127.0.0.1:{port}")) {
            Ok(listener) => {
                let port = listener.local_addr()?.port();
                if offset > 0 {
                    crate::debug!("reload"; "port {} taken, using {}", base_port, port);
                }
                return Ok((listener, port));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "failed to bind reload port after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_ephemeral_port() {
        let (_listener, port) = try_bind_port(0, 1).unwrap();
        assert_ne!(port, 0);
    }

    #[test]
    fn test_bind_falls_back_when_taken() {
        let (first, taken) = try_bind_port(0, 1).unwrap();
        let (_second, port) = try_bind_port(taken, MAX_PORT_RETRIES).unwrap();
        assert_ne!(port, taken);
        drop(first);
    }
}
