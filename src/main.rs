//! snapshot-manifest - UI snapshot manifest maintenance
//!
//! `sync` adds references for new screenshots, `validate` checks the fixed
//! component list and repairs missing references

use clap::{Parser, Subcommand};
use snapshot_manifest::{commands, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapshot-manifest")]
#[command(author, version, about = "Keeps the UI snapshot manifest in sync with preview screenshots")]
struct Cli {
    /// Project root holding the preview directory and manifests
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default snapshot-manifest.toml
    Init,

    /// Add a manifest reference for every screenshot in the preview directory
    Sync {
        /// Report changes without writing the manifest
        #[arg(long)]
        dry_run: bool,
    },

    /// Check screenshots and manifest references for every known component
    Validate {
        /// Strict mode (fail when any screenshot is missing)
        #[arg(long)]
        strict: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            commands::init(&cli.root)?;
        }
        Commands::Sync { dry_run } => {
            commands::sync(&cli.root, dry_run)?;
        }
        Commands::Validate { strict, json } => {
            let format = if json {
                commands::OutputFormat::Json
            } else {
                commands::OutputFormat::Summary
            };
            commands::validate(&cli.root, strict, format)?;
        }
    }

    Ok(())
}
