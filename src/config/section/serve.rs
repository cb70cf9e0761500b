//! `[serve]` section: development server settings.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"
//! port = 4747
//! watch = true    # rebuild preview on slot file changes
//! open = false    # open the editor in a browser on startup
//! ```

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Development server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Interface to bind
    pub interface: IpAddr,

    /// TCP port (falls forward to the next free port when taken)
    pub port: u16,

    /// Watch slot files and rebuild the preview on external edits
    pub watch: bool,

    /// Open the editor in the default browser after binding
    pub open: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4747,
            watch: true,
            open: false,
        }
    }
}
