//! Vibe - a local code playground with live preview.

#![allow(dead_code)]

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod lang;
mod logger;
mod preview;
mod reload;
mod sync;
mod utils;
mod workspace;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ProjectConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(ProjectConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name, kind, dry } => {
            cli::init::new_project(&config, name.is_some(), *kind, *dry)
        }
        Commands::Serve { .. } => cli::serve::serve_project(&config),
        Commands::Fmt { slot } => cli::fmt::format_buffers(&config, slot.as_deref()),
        Commands::Pack { output } => cli::bundle::pack_project(&config, output.as_deref()),
        Commands::Unpack { file, force } => cli::bundle::unpack_bundle(&config, file, *force),
        Commands::Export { output } => cli::export::export_project(&config, output.as_deref()),
        Commands::Connect { args } => cli::remote::connect_remote(&config, args),
        Commands::Push {} => cli::remote::push_project(&config),
        Commands::Pull {} => cli::remote::pull_project(&config),
    }
}
