//! Project initialization.
//!
//! Scaffolds `vibe.toml` plus the kind's slot files from embedded seed
//! content. Never overwrites an existing playground.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::ProjectConfig;
use crate::log;
use crate::workspace::ProjectKind;

/// Initialization mode determines validation rules.
#[derive(Debug, Clone, Copy)]
enum InitMode {
    /// `vibe init` - scaffold into the current directory
    CurrentDir,
    /// `vibe init <name>` - create a new subdirectory
    NewDir,
}

/// Create a new playground.
///
/// # Steps
/// 1. Validate the target directory
/// 2. Write `vibe.toml`
/// 3. Write the kind's slot files from seed content
/// 4. Write `.gitignore`
///
/// If `dry` is true, only prints the config template to stdout.
pub fn new_project(
    config: &ProjectConfig,
    has_name: bool,
    kind: ProjectKind,
    dry: bool,
) -> Result<()> {
    if dry {
        print!("{}", config_template(&config.project.name, kind));
        return Ok(());
    }

    let root = config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    if let Err(e) = validate_target(root, &config.config_path, mode) {
        log!("error"; "{}", e);
        std::process::exit(1);
    }

    fs::create_dir_all(root)
        .with_context(|| format!("failed to create '{}'", root.display()))?;
    write_config_file(config, kind)?;
    write_seed_files(root, kind)?;
    write_ignore_file(root)?;

    log!("init"; "{} playground ready in {}", kind.id(), root.display());
    log!("init"; "next: cd in and run `vibe serve`");
    Ok(())
}

/// Validate the target before writing anything.
///
/// A named directory must not exist yet; initializing in place only requires
/// that no config file is present (other files are left alone).
fn validate_target(root: &Path, config_path: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::NewDir if root.exists() => {
            bail!(
                "Directory '{}' already exists.\n\
                 Choose a different name or remove the existing directory.",
                root.display()
            );
        }
        _ if config_path.exists() => {
            bail!(
                "'{}' already exists - this is already a playground.\n\
                 Use `vibe init <name>` to scaffold a fresh one in a subdirectory.",
                config_path.display()
            );
        }
        _ => Ok(()),
    }
}

/// Generate vibe.toml content with comments.
fn config_template(name: &str, kind: ProjectKind) -> String {
    format!(
        r#"# Vibe configuration file (v{version})
# https://github.com/vibe-rs/vibe-ide

[project]
name = "{name}"
kind = "{kind}"    # web | react | python
description = ""

[serve]
# interface = "127.0.0.1"
# port = 4747
# watch = true       # rebuild the preview when slot files change on disk
# open = false       # open the editor in a browser after binding

[preview]
# debounce_ms = 500  # quiet period between the last keystroke and a rebuild
# release_ms = 1000  # grace period before a superseded preview URL dies
# feedback_ms = 1000 # how long the Run control flashes after a rebuild
"#,
        version = env!("CARGO_PKG_VERSION"),
        name = name.replace('"', "\\\""),
        kind = kind.id(),
    )
}

fn write_config_file(config: &ProjectConfig, kind: ProjectKind) -> Result<()> {
    let content = config_template(&config.project.name, kind);
    fs::write(&config.config_path, content).with_context(|| {
        format!("failed to write config file '{}'", config.config_path.display())
    })
}

fn write_seed_files(root: &Path, kind: ProjectKind) -> Result<()> {
    for &slot in kind.slots() {
        let path = root.join(slot.file_name());
        fs::write(&path, kind.seed_content(slot))
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        crate::debug!("init"; "wrote {}", slot.file_name());
    }
    Ok(())
}

fn write_ignore_file(root: &Path) -> Result<()> {
    // .vibe/ holds the sync token; it must never end up in a repository
    fs::write(root.join(".gitignore"), ".vibe/\n").context("failed to write .gitignore")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_dir_must_not_exist() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("vibe.toml");
        assert!(validate_target(temp.path(), &config_path, InitMode::NewDir).is_err());

        let fresh = temp.path().join("new_playground");
        assert!(validate_target(&fresh, &fresh.join("vibe.toml"), InitMode::NewDir).is_ok());
    }

    #[test]
    fn test_current_dir_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("vibe.toml");
        assert!(validate_target(temp.path(), &config_path, InitMode::CurrentDir).is_ok());

        fs::write(&config_path, "[project]\nname = \"x\"").unwrap();
        assert!(validate_target(temp.path(), &config_path, InitMode::CurrentDir).is_err());
    }

    #[test]
    fn test_current_dir_tolerates_other_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "hello").unwrap();
        let config_path = temp.path().join("vibe.toml");
        assert!(validate_target(temp.path(), &config_path, InitMode::CurrentDir).is_ok());
    }

    #[test]
    fn test_config_template_is_valid_toml() {
        let content = config_template("my-playground", ProjectKind::React);
        let config: crate::config::ProjectConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.project.name, "my-playground");
        assert_eq!(config.project.kind, ProjectKind::React);
        // Commented defaults stay defaults
        assert_eq!(config.serve.port, 4747);
        assert_eq!(config.preview.debounce_ms, 500);
    }

    #[test]
    fn test_config_template_escapes_quotes() {
        let content = config_template("say \"hi\"", ProjectKind::Web);
        let config: crate::config::ProjectConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.project.name, "say \"hi\"");
    }

    #[test]
    fn test_seed_files_per_kind() {
        let temp = TempDir::new().unwrap();
        write_seed_files(temp.path(), ProjectKind::React).unwrap();

        assert!(temp.path().join("App.jsx").exists());
        assert!(temp.path().join("style.css").exists());
        // Web-only slots are not scaffolded for react
        assert!(!temp.path().join("index.html").exists());
        assert!(!temp.path().join("script.js").exists());
    }
}
