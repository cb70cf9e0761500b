//! `vibe export` - write the project as a plain directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ProjectConfig;
use crate::embed::seed::{README_MD, ReadmeVars};
use crate::log;
use crate::utils::date::DateTimeUtc;
use crate::utils::plural::plural_count;
use crate::workspace::{ProjectKind, Session};

/// Export every slot file plus a generated README into a directory.
///
/// Existing files in the target directory are overwritten; export output is
/// disposable by design.
pub fn export_project(config: &ProjectConfig, output: Option<&Path>) -> Result<()> {
    let session = Session::load(config)?;

    let dir = match output {
        Some(path) => path.to_path_buf(),
        None => config.root_join(export_dir_name(session.name())),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create '{}'", dir.display()))?;

    let slots = session.kind().slots();
    for &slot in slots {
        let path = dir.join(slot.file_name());
        fs::write(&path, session.text(slot))
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }
    fs::write(dir.join("README.md"), render_readme(&session))
        .context("failed to write README.md")?;

    log!(
        "export";
        "wrote {} + README.md to {}",
        plural_count(slots.len(), "file"),
        dir.display()
    );
    Ok(())
}

/// Default export directory: project name sanitized to `[A-Za-z0-9_]`.
fn export_dir_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{safe}-export")
}

fn render_readme(session: &Session) -> String {
    let files: Vec<String> = session
        .kind()
        .slots()
        .iter()
        .map(|s| format!("- {}", s.file_name()))
        .collect();
    let description = match session.description() {
        "" => "A project created with vibe.",
        text => text,
    };
    README_MD.render(&ReadmeVars {
        name: session.name(),
        description,
        files: &files.join("\n"),
        run_note: run_note(session.kind()),
        version: env!("CARGO_PKG_VERSION"),
        date: &DateTimeUtc::now().to_rfc3339(),
    })
}

const fn run_note(kind: ProjectKind) -> &'static str {
    match kind {
        ProjectKind::Web => "Open `index.html` in a browser.",
        ProjectKind::React => {
            "Bundle `App.jsx` with a React toolchain (for example Vite), importing `style.css`."
        }
        ProjectKind::Python => "Run `python main.py`.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_at(root: &Path, name: &str, kind: ProjectKind) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        config.set_root(root);
        config.project.name = name.to_string();
        config.project.kind = kind;
        config
    }

    #[test]
    fn test_export_writes_slots_and_readme() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<h1>Hi</h1>").unwrap();

        let config = config_at(temp.path(), "My Site", ProjectKind::Web);
        export_project(&config, None).unwrap();

        let dir = temp.path().join("My_Site-export");
        assert_eq!(
            fs::read_to_string(dir.join("index.html")).unwrap(),
            "<h1>Hi</h1>"
        );
        // Empty slots still produce their files
        assert!(dir.join("style.css").exists());
        assert!(dir.join("script.js").exists());

        let readme = fs::read_to_string(dir.join("README.md")).unwrap();
        assert!(readme.starts_with("# My Site"));
        assert!(readme.contains("- index.html"));
        assert!(readme.contains("- style.css"));
        assert!(readme.contains("Open `index.html` in a browser."));
    }

    #[test]
    fn test_export_honors_output_dir() {
        let temp = TempDir::new().unwrap();
        let config = config_at(temp.path(), "demo", ProjectKind::Python);
        let out = temp.path().join("published");

        export_project(&config, Some(&out)).unwrap();

        assert!(out.join("main.py").exists());
        assert!(
            fs::read_to_string(out.join("README.md"))
                .unwrap()
                .contains("Run `python main.py`.")
        );
        assert!(!temp.path().join("demo-export").exists());
    }

    #[test]
    fn test_readme_description_fallback() {
        let temp = TempDir::new().unwrap();
        let session = Session::open(temp.path(), "demo", ProjectKind::Web, "").unwrap();
        assert!(render_readme(&session).contains("A project created with vibe."));

        let session = Session::open(temp.path(), "demo", ProjectKind::Web, "css lab").unwrap();
        assert!(render_readme(&session).contains("css lab"));
    }
}
