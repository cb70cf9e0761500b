//! Live reload channel between the serve process and open editors.

pub mod message;
pub mod server;

pub use message::ReloadMessage;
