//! Actor message definitions.
//!
//! ```text
//! API / FsActor --PreviewMsg--> PreviewActor --WsMsg--> WsActor
//! ```

use crate::reload::ReloadMessage;
use crate::workspace::Slot;

// =============================================================================
// PreviewActor messages
// =============================================================================

/// Messages to the preview actor.
#[derive(Debug)]
pub enum PreviewMsg {
    /// An editor buffer changed; rebuild after the quiet period
    Edited { slot: Slot },
    /// A slot file changed on disk (external editor)
    FileChanged { slot: Slot },
    /// Rebuild immediately, bypassing the debounce
    RunNow,
    /// Buffers were replaced by a sync pull; notify editors and rebuild
    Synced,
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor messages
// =============================================================================

/// Messages to the WebSocket actor.
#[derive(Debug)]
pub enum WsMsg {
    /// Send a message to every connected editor
    Broadcast(ReloadMessage),
    /// Register a freshly accepted editor connection
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
