//! Project configuration management for `vibe.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── preview    # [preview]
//! │   ├── project    # [project]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                               |
//! |-------------|-------------------------------------------------------|
//! | `[project]` | Project metadata (name, kind, description)            |
//! | `[serve]`   | Development server (interface, port, watch, open)     |
//! | `[preview]` | Rebuild pipeline timing (debounce, release, feedback) |

pub mod section;
pub mod types;

// Re-export from section/
pub use section::{PreviewConfig, ProjectSection, ServeConfig};

// Re-export from types/
pub use types::{ConfigError, cfg, init_config, reload_config};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing vibe.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Workspace root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Project metadata (name, kind, description)
    #[serde(default)]
    pub project: ProjectSection,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Preview rebuild timing
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            project: ProjectSection::default(),
            serve: ServeConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The workspace root is determined by the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        // Validate config existence (skip for init)
        if !cli.is_init() && !exists {
            log!(
                "error";
                "Config file '{}' not found. Run 'vibe init' to create a new project.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        // Load or create default config
        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        // Set paths and apply CLI options
        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        // Full validation (skip for init: no config file yet)
        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => {
                let path = cwd.join(name).join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            Commands::Init { name: None, .. } => {
                let path = cwd.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => {
                // Search upward from cwd
                match find_config_file(&cli.config) {
                    Some(path) => Ok((path, true)),
                    None => Ok((cwd.join(&cli.config), false)),
                }
            }
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        // Resolve root path
        let root = match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => std::env::current_dir().unwrap_or_default().join(name),
            Commands::Init { name: None, .. } => std::env::current_dir().unwrap_or_default(),
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let root = crate::utils::path::normalize_path(&root);
        self.set_root(&root);

        // Normalize config path (already set in load(), just canonicalize)
        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        self.apply_command_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (vibe.toml) since it's always at the workspace root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    /// Get the workspace root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the workspace root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Join a path with the workspace root directory.
    ///
    /// Shorthand for `config.get_root().join(path)`.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.expect("CLI should be set during initialization")
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        // Set verbose mode globally
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Init { name, kind, .. } => {
                self.project.kind = *kind;
                // A scaffolded project is named after its directory
                let dir_name = match name {
                    Some(name) => name.file_name().map(|n| n.to_string_lossy().into_owned()),
                    None => std::env::current_dir()
                        .ok()
                        .and_then(|d| d.file_name().map(|n| n.to_string_lossy().into_owned())),
                };
                if let Some(dir_name) = dir_name {
                    self.project.name = dir_name;
                }
            }
            Commands::Serve {
                interface,
                port,
                watch,
                open,
            } => {
                self.apply_serve_options(*interface, *port, *watch, *open);
            }
            _ => {}
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_options(
        &mut self,
        interface: Option<std::net::IpAddr>,
        port: Option<u16>,
        watch: Option<bool>,
        open: Option<bool>,
    ) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());
        Self::update_option(&mut self.serve.watch, watch.as_ref());
        Self::update_option(&mut self.serve.open, open.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        if self.project.name.trim().is_empty() {
            bail!(ConfigError::Validation(
                "project.name must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// config file discovery
// ============================================================================

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/playground/exports/   ← cwd
/// /home/user/playground/vibe.toml  ← found!
/// ```
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    // First check if config_name is an absolute path or exists in cwd
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from cwd looking for config file
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[project]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> ProjectConfig {
    let config = format!("[project]\nname = \"testbed\"\n{extra}");
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::ProjectKind;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<ProjectConfig, _> = toml::from_str("[project\nname = \"My Playground\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = ProjectConfig::default();
        // Default root is empty PathBuf, set during config loading
        assert_eq!(config.get_root(), Path::new(""));
    }

    #[test]
    fn test_set_root() {
        let mut config = ProjectConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_project_config_default() {
        let config = ProjectConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.project.name, "untitled");
        assert_eq!(config.project.kind, ProjectKind::Web);
        assert_eq!(config.serve.port, 4747);
        assert_eq!(config.preview.debounce_ms, 500);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[project]\nname = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.project.name, "Test");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[project]\nname = \"Test\"\nkind = \"python\"";
        let (_, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut config = test_parse_config("");
        config.config_path = PathBuf::from("/"); // bypass the existence check
        config.project.name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
