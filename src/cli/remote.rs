//! `vibe connect` / `vibe push` / `vibe pull` - hosted repository sync.

use anyhow::Result;

use crate::cli::ConnectArgs;
use crate::config::ProjectConfig;
use crate::log;
use crate::sync::{self, Connection};
use crate::utils::plural::plural_count;
use crate::workspace::Session;

/// Link the playground to a hosted repository.
///
/// Validates the token against the repository before saving anything, so a
/// typo'd URL or revoked token fails here rather than on the first push.
pub fn connect_remote(config: &ProjectConfig, args: &ConnectArgs) -> Result<()> {
    let connection = sync::connect(
        config.get_root(),
        &args.repo,
        &args.token,
        args.branch.as_deref(),
    )?;

    log!(
        "sync";
        "connected to {} on {} (branch '{}')",
        connection.slug(),
        connection.platform.name(),
        connection.branch
    );
    log!(
        "sync";
        "credentials saved to {} (kept out of git via .gitignore)",
        Connection::path(config.get_root()).display()
    );
    Ok(())
}

/// Push every slot file of the current kind to the connected repository.
pub fn push_project(config: &ProjectConfig) -> Result<()> {
    let connection = Connection::load(config.get_root())?;
    let session = Session::load(config)?;

    log!("sync"; "pushing to {} ...", connection.slug());
    let pushed = sync::push(&session.snapshot(), &connection)?;
    log!(
        "sync";
        "pushed {} to {}:{}",
        plural_count(pushed, "file"),
        connection.slug(),
        connection.branch
    );
    Ok(())
}

/// Pull slot files from the connected repository into the buffers.
pub fn pull_project(config: &ProjectConfig) -> Result<()> {
    let connection = Connection::load(config.get_root())?;
    let mut session = Session::load(config)?;

    log!("sync"; "pulling from {} ...", connection.slug());
    let changed = sync::pull(&mut session, &connection)?;
    if changed.is_empty() {
        log!("sync"; "already up to date");
    } else {
        for slot in &changed {
            log!("sync"; "updated {}", slot.file_name());
        }
        log!("sync"; "pulled {}", plural_count(changed.len(), "file"));
    }
    Ok(())
}
