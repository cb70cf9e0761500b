//! Command-line interface definitions.

use crate::workspace::ProjectKind;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Vibe code playground CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: vibe.toml)
    #[arg(short = 'C', long, default_value = "vibe.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new playground project from template
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Project kind to scaffold
        #[arg(short, long, value_enum, default_value_t = ProjectKind::Web)]
        kind: ProjectKind,

        /// Show what would be created without writing anything
        #[arg(long)]
        dry: bool,
    },

    /// Start the editor server with live preview
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching so external edits trigger a rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,

        /// Open the editor in the default browser once bound
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        open: Option<bool>,
    },

    /// Format slot files in place
    #[command(visible_alias = "f")]
    Fmt {
        /// Slot to format (markup, style, script, component, python); all when omitted
        slot: Option<String>,
    },

    /// Save the project as a shareable JSON snapshot
    Pack {
        /// Output file path (default: `<name>.vibe.json` in the workspace root)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Restore project files from a JSON snapshot
    Unpack {
        /// Snapshot file written by `vibe pack`
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Overwrite slot files that differ from the snapshot
        #[arg(short, long)]
        force: bool,
    },

    /// Export the project as a plain directory with a README
    #[command(visible_alias = "e")]
    Export {
        /// Output directory (default: `<name>-export` in the workspace root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Link the project to a hosted git repository
    Connect {
        #[command(flatten)]
        args: ConnectArgs,
    },

    /// Upload slot files to the linked repository
    Push {},

    /// Download slot files from the linked repository
    Pull {},
}

/// Connect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Repository URL (github.com, gitlab.com and codeberg.org are supported)
    #[arg(short, long, value_hint = clap::ValueHint::Url)]
    pub repo: String,

    /// Personal access token with repository write scope
    #[arg(short, long)]
    pub token: String,

    /// Branch to push to and pull from (default: the remote's default branch)
    #[arg(short, long)]
    pub branch: Option<String>,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
