//! `vibe fmt` - reformat slot buffers in place.

use anyhow::{Result, bail};

use crate::config::ProjectConfig;
use crate::lang;
use crate::log;
use crate::utils::plural::plural_count;
use crate::workspace::{Session, Slot};

/// Reformat one slot, or every slot of the project kind.
///
/// Buffers whose text is already in formatted shape are left untouched,
/// so repeated runs don't churn file timestamps.
pub fn format_buffers(config: &ProjectConfig, slot: Option<&str>) -> Result<()> {
    let mut session = Session::load(config)?;
    let targets = resolve_targets(&session, slot)?;

    let mut changed = 0usize;
    for slot in targets {
        let formatted = lang::format(session.text(slot), slot.language());
        if session.set_text(slot, formatted) {
            session.save_slot(slot)?;
            log!("fmt"; "formatted {}", slot.file_name());
            changed += 1;
        }
    }

    if changed == 0 {
        log!("fmt"; "all buffers already formatted");
    } else {
        log!("fmt"; "reformatted {}", plural_count(changed, "file"));
    }
    Ok(())
}

/// Resolve the `--slot` argument against the project kind.
fn resolve_targets(session: &Session, slot: Option<&str>) -> Result<Vec<Slot>> {
    match slot {
        None => Ok(session.kind().slots().to_vec()),
        Some(id) => {
            let Some(slot) = Slot::from_id(id) else {
                bail!(
                    "unknown slot '{}' (valid: {})",
                    id,
                    Slot::ALL.map(Slot::id).join(", ")
                );
            };
            if !session.has_slot(slot) {
                bail!(
                    "slot '{}' does not exist in a {} project",
                    id,
                    session.kind().id()
                );
            }
            Ok(vec![slot])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::ProjectKind;
    use std::fs;
    use tempfile::TempDir;

    fn config_at(root: &std::path::Path, kind: ProjectKind) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        config.set_root(root);
        config.project.kind = kind;
        config
    }

    #[test]
    fn test_resolve_all_slots_of_kind() {
        let temp = TempDir::new().unwrap();
        let session = Session::open(temp.path(), "t", ProjectKind::Web, "").unwrap();

        let targets = resolve_targets(&session, None).unwrap();
        assert_eq!(targets, vec![Slot::Markup, Slot::Style, Slot::Script]);
    }

    #[test]
    fn test_resolve_single_slot() {
        let temp = TempDir::new().unwrap();
        let session = Session::open(temp.path(), "t", ProjectKind::Web, "").unwrap();

        assert_eq!(
            resolve_targets(&session, Some("style")).unwrap(),
            vec![Slot::Style]
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_id() {
        let temp = TempDir::new().unwrap();
        let session = Session::open(temp.path(), "t", ProjectKind::Web, "").unwrap();

        let err = resolve_targets(&session, Some("banana")).unwrap_err();
        assert!(err.to_string().contains("unknown slot"));
    }

    #[test]
    fn test_resolve_rejects_foreign_slot() {
        let temp = TempDir::new().unwrap();
        let session = Session::open(temp.path(), "t", ProjectKind::Web, "").unwrap();

        let err = resolve_targets(&session, Some("python")).unwrap_err();
        assert!(err.to_string().contains("web project"));
    }

    #[test]
    fn test_format_writes_back_changed_slot() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("style.css"), "h1{color:red;}").unwrap();

        let config = config_at(temp.path(), ProjectKind::Web);
        format_buffers(&config, Some("style")).unwrap();

        let formatted = fs::read_to_string(temp.path().join("style.css")).unwrap();
        assert!(formatted.starts_with("h1 {"));
        assert!(formatted.contains("  color:red;"));
    }

    #[test]
    fn test_format_skips_already_formatted() {
        let temp = TempDir::new().unwrap();
        let css = "h1 {\n  color: blue;\n}";
        fs::write(temp.path().join("style.css"), css).unwrap();
        // Absent slot files must not get created by a formatting no-op
        let config = config_at(temp.path(), ProjectKind::Web);
        format_buffers(&config, None).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("style.css")).unwrap(),
            css
        );
        assert!(!temp.path().join("index.html").exists());
    }
}
