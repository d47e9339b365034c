//! vbasync — Office macro source sync CLI.
//!
//! # Usage
//!
//! ```text
//! vbasync export --document <doc> --out <dir> [--app excel|word]
//! vbasync import --document <doc> --src <dir> [--app ...] [--clean]
//! vbasync sync --document <doc> --dir <dir> --direction pull|push
//!              [--app ...] [--clean] [--dry-run] [--json]
//! vbasync ribbon pull --document <doc> --out <xml>
//! vbasync ribbon push --document <doc> --xml <xml> [--out-document <doc>]
//!                     [--target customUI14.xml|customUI.xml]
//! ```

mod commands;
mod host;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    export::ExportArgs, import::ImportArgs, ribbon::RibbonCommand, sync::SyncArgs,
};
use vbasync_core::HostApp;
use vbasync_sync::SyncDirection;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "vbasync",
    version,
    about = "Sync Office macro sources between a folder and a live document project",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export macro components from a document's live project to a folder.
    Export(ExportArgs),

    /// Import folder components into a document's live project.
    Import(ImportArgs),

    /// Sync in either direction: pull (live → folder) or push (folder → live).
    Sync(SyncArgs),

    /// Read or write the ribbon customization XML inside a document package.
    Ribbon {
        #[command(subcommand)]
        command: RibbonCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared argument wrappers — parsed from CLI strings, convert to core types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`HostApp`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct HostAppArg(pub HostApp);

impl FromStr for HostAppArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excel" => Ok(Self(HostApp::Excel)),
            "word" => Ok(Self(HostApp::Word)),
            other => Err(format!("unknown host app '{other}'; expected: excel, word")),
        }
    }
}

impl fmt::Display for HostAppArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<HostAppArg> for HostApp {
    fn from(a: HostAppArg) -> Self {
        a.0
    }
}

/// Thin wrapper so clap can parse [`SyncDirection`] from CLI args.
#[derive(Debug, Clone)]
pub struct DirectionArg(pub SyncDirection);

impl FromStr for DirectionArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pull" => Ok(Self(SyncDirection::Pull)),
            "push" => Ok(Self(SyncDirection::Push)),
            other => Err(format!("unknown direction '{other}'; expected: pull, push")),
        }
    }
}

impl fmt::Display for DirectionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SyncDirection::Pull => write!(f, "pull"),
            SyncDirection::Push => write!(f, "push"),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Export(args) => args.run(),
        Commands::Import(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Ribbon { command } => commands::ribbon::run(command),
    }
}
