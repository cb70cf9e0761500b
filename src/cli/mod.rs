//! Command-line interface module.

mod args;
pub mod bundle;
pub mod export;
pub mod fmt;
pub mod init;
pub mod remote;
pub mod serve;

pub use args::{Cli, Commands, ConnectArgs};
