//! Core runtime state shared across the codebase.

mod state;

pub use state::{is_serving, is_shutdown, register_server, set_serving, setup_shutdown_handler};
