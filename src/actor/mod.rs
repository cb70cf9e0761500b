//! Actor system for the live preview.
//!
//! Message-passing concurrency for the serve loop:
//!
//! ```text
//! HTTP API ----\
//! FsActor -----+--> PreviewActor --> WsActor
//! (watch)           (debounce,       (broadcast)
//!                    compose,
//!                    publish)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher feeding external edits
//! - `preview` - Debounced rebuild loop and handle lifecycle
//! - `ws` - WebSocket broadcast to editor pages
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod preview;
pub mod ws;

pub use coordinator::Coordinator;
pub use messages::PreviewMsg;
