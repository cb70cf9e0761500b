//! `vibe pack` / `vibe unpack` - project snapshots as single JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::ProjectConfig;
use crate::log;
use crate::utils::plural::plural_count;
use crate::workspace::{Bundle, Session, Slot};

/// Write the current project as a snapshot file.
pub fn pack_project(config: &ProjectConfig, output: Option<&Path>) -> Result<()> {
    let session = Session::load(config)?;
    let bundle = session.to_bundle();

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config.root_join(bundle.file_name()),
    };
    fs::write(&path, bundle.to_json()?)
        .with_context(|| format!("failed to write snapshot '{}'", path.display()))?;

    log!(
        "pack";
        "saved {} ({}) to {}",
        bundle.name,
        plural_count(bundle.files.len(), "slot"),
        path.display()
    );
    Ok(())
}

/// Restore slot files from a snapshot.
///
/// Slots whose buffer already holds different text are left alone unless
/// `force` is set; filling an empty buffer never needs `force`. The config
/// file is not touched, so the playground keeps its own name and description.
pub fn unpack_bundle(config: &ProjectConfig, file: &Path, force: bool) -> Result<()> {
    // The config search may have walked upward; relative snapshot paths
    // resolve against cwd first, then the workspace root.
    let file = crate::utils::path::resolve_path(file, config.get_root());
    let json = fs::read_to_string(&file)
        .with_context(|| format!("failed to read snapshot '{}'", file.display()))?;
    let bundle = Bundle::from_json(&json)?;

    let mut session = Session::load(config)?;
    if bundle.kind != session.kind() {
        bail!(
            "snapshot '{}' is a {} project, but this playground is {}",
            bundle.name,
            bundle.kind.id(),
            session.kind().id()
        );
    }

    let (restored, kept) = apply_bundle_files(&mut session, &bundle, force);
    for slot in &restored {
        session.save_slot(*slot)?;
    }
    for slot in &kept {
        log!(
            "warning";
            "{} differs from the snapshot, keeping local copy (use --force to overwrite)",
            slot.file_name()
        );
    }

    if restored.is_empty() {
        log!("unpack"; "nothing to restore, all slots already match '{}'", bundle.name);
    } else {
        log!(
            "unpack";
            "restored {} from '{}' (saved {})",
            plural_count(restored.len(), "slot"),
            bundle.name,
            bundle.saved_at
        );
    }
    Ok(())
}

/// Apply snapshot contents to the session, honoring `force`.
///
/// Returns `(restored, kept)` where `kept` lists non-empty buffers that
/// differ from the snapshot and were preserved.
fn apply_bundle_files(
    session: &mut Session,
    bundle: &Bundle,
    force: bool,
) -> (Vec<Slot>, Vec<Slot>) {
    let mut restored = Vec::new();
    let mut kept = Vec::new();
    for (&slot, text) in &bundle.files {
        if !session.has_slot(slot) || session.text(slot) == text {
            continue;
        }
        if !force && !session.text(slot).trim().is_empty() {
            kept.push(slot);
            continue;
        }
        session.set_text(slot, text.clone());
        restored.push(slot);
    }
    (restored, kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::ProjectKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_at(root: &Path, kind: ProjectKind) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        config.set_root(root);
        config.project.name = "demo".to_string();
        config.project.kind = kind;
        config
    }

    fn write_snapshot(dir: &Path) -> PathBuf {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("index.html"), "<h1>from snapshot</h1>").unwrap();
        let session = Session::open(source.path(), "demo", ProjectKind::Web, "").unwrap();

        let path = dir.join("demo.vibe.json");
        fs::write(&path, session.to_bundle().to_json().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_pack_writes_default_file_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<p>x</p>").unwrap();

        let config = config_at(temp.path(), ProjectKind::Web);
        pack_project(&config, None).unwrap();

        let json = fs::read_to_string(temp.path().join("demo.vibe.json")).unwrap();
        let bundle = Bundle::from_json(&json).unwrap();
        assert_eq!(bundle.files[&Slot::Markup], "<p>x</p>");
    }

    #[test]
    fn test_pack_honors_output_path() {
        let temp = TempDir::new().unwrap();
        let config = config_at(temp.path(), ProjectKind::Web);
        let out = temp.path().join("elsewhere.json");

        pack_project(&config, Some(&out)).unwrap();
        assert!(out.exists());
        assert!(!temp.path().join("demo.vibe.json").exists());
    }

    #[test]
    fn test_unpack_fills_empty_project() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(temp.path());

        let config = config_at(temp.path(), ProjectKind::Web);
        unpack_bundle(&config, &snapshot, false).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            "<h1>from snapshot</h1>"
        );
    }

    #[test]
    fn test_unpack_keeps_differing_slot_without_force() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(temp.path());
        fs::write(temp.path().join("index.html"), "<h1>local work</h1>").unwrap();

        let config = config_at(temp.path(), ProjectKind::Web);
        unpack_bundle(&config, &snapshot, false).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            "<h1>local work</h1>"
        );
    }

    #[test]
    fn test_unpack_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(temp.path());
        fs::write(temp.path().join("index.html"), "<h1>local work</h1>").unwrap();

        let config = config_at(temp.path(), ProjectKind::Web);
        unpack_bundle(&config, &snapshot, true).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            "<h1>from snapshot</h1>"
        );
    }

    #[test]
    fn test_unpack_rejects_kind_mismatch() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(temp.path());

        let config = config_at(temp.path(), ProjectKind::Python);
        let err = unpack_bundle(&config, &snapshot, false).unwrap_err();
        assert!(err.to_string().contains("web project"));
    }

    #[test]
    fn test_unpack_rejects_plain_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("not-a-snapshot.json");
        fs::write(&path, "{\"hello\": 1}").unwrap();

        let config = config_at(temp.path(), ProjectKind::Web);
        assert!(unpack_bundle(&config, &path, false).is_err());
    }
}
